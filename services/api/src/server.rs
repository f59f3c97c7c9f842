use crate::cli::ServeArgs;
use crate::infra::{evaluator_from_config, AppState, InMemoryLoanRepository};
use crate::routes::with_finance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smart_hr::config::AppConfig;
use smart_hr::error::AppError;
use smart_hr::finance::loans::LoanApplicationService;
use smart_hr::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLoanRepository::default());
    let loan_service = Arc::new(LoanApplicationService::new(
        repository,
        evaluator_from_config(&config),
    ));

    let app = with_finance_routes(loan_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        locale = config.locale.code(),
        max_deduction_pct = config.loans.max_deduction_pct,
        %addr,
        "smart hr finance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
