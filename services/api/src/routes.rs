use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use smart_hr::assistant::AssistantReply;
use smart_hr::error::AppError;
use smart_hr::finance::accounting::{JournalEntry, JournalTotals};
use smart_hr::finance::cashier::{
    Cart, CartTotals, CheckoutError, Customer, PaymentMethod, PricingTier, Product, Sale,
};
use smart_hr::finance::loans::{loan_router, LoanApplicationRepository, LoanApplicationService};
use smart_hr::finance::payroll::{PayrollImporter, PayrollLine, PayrollRecord, PayrollSummary};
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct PayrollSheetRequest {
    /// Raw CSV export of the master sheet; takes precedence over `lines`.
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) lines: Vec<PayrollLine>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PayrollSheetResponse {
    pub(crate) summary: PayrollSummary,
    pub(crate) records: Vec<PayrollRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartItemRequest {
    pub(crate) product: Product,
    #[serde(default = "one")]
    pub(crate) quantity: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartRequest {
    #[serde(default)]
    pub(crate) tier: PricingTier,
    #[serde(default)]
    pub(crate) discount: u64,
    pub(crate) items: Vec<CartItemRequest>,
}

impl CartRequest {
    fn into_cart(self) -> Result<(Cart, Vec<Product>), CheckoutError> {
        let mut cart = Cart::new(self.tier);
        cart.set_discount(self.discount);
        let mut products = Vec::with_capacity(self.items.len());
        for item in self.items {
            cart.add_quantity(&item.product, item.quantity)?;
            products.push(item.product);
        }
        Ok((cart, products))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutRequest {
    #[serde(flatten)]
    pub(crate) cart: CartRequest,
    pub(crate) method: PaymentMethod,
    #[serde(default)]
    pub(crate) customer: Option<Customer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckoutResponse {
    pub(crate) sale: Sale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) customer: Option<Customer>,
    /// Stock levels after the sale.
    pub(crate) products: Vec<Product>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantDecodeRequest {
    pub(crate) text: String,
}

pub(crate) fn with_finance_routes<R>(service: Arc<LoanApplicationService<R>>) -> axum::Router
where
    R: LoanApplicationRepository + 'static,
{
    loan_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/payroll/summary", post(payroll_summary_endpoint))
        .route(
            "/api/v1/accounting/journal/validate",
            post(journal_validate_endpoint),
        )
        .route("/api/v1/cashier/quote", post(cashier_quote_endpoint))
        .route("/api/v1/cashier/checkout", post(cashier_checkout_endpoint))
        .route("/api/v1/assistant/decode", post(assistant_decode_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn payroll_summary_endpoint(
    Json(payload): Json<PayrollSheetRequest>,
) -> Result<Json<PayrollSheetResponse>, AppError> {
    let records = match payload.csv {
        Some(csv) => PayrollImporter::from_reader(Cursor::new(csv.into_bytes()))?,
        None => payload
            .lines
            .into_iter()
            .map(PayrollRecord::compute)
            .collect::<Result<Vec<_>, _>>()?,
    };

    let summary = PayrollSummary::from_records(&records)?;
    Ok(Json(PayrollSheetResponse { summary, records }))
}

pub(crate) async fn journal_validate_endpoint(
    Json(entry): Json<JournalEntry>,
) -> Result<Json<JournalTotals>, AppError> {
    let totals = entry.validate()?;
    Ok(Json(totals))
}

pub(crate) async fn cashier_quote_endpoint(
    Json(payload): Json<CartRequest>,
) -> Result<Json<CartTotals>, AppError> {
    let (cart, _) = payload.into_cart()?;
    Ok(Json(cart.totals()?))
}

pub(crate) async fn cashier_checkout_endpoint(
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let CheckoutRequest {
        cart,
        method,
        mut customer,
    } = payload;
    let (mut cart, mut products) = cart.into_cart()?;

    let sale = cart.checkout(method, customer.as_mut(), &mut products)?;
    Ok(Json(CheckoutResponse {
        sale,
        customer,
        products,
    }))
}

pub(crate) async fn assistant_decode_endpoint(
    Json(payload): Json<AssistantDecodeRequest>,
) -> Json<AssistantReply> {
    Json(AssistantReply::parse(&payload.text))
}
