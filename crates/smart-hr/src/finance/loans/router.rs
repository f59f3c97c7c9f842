use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::category::ApplicantCategory;
use super::domain::{LoanApplicationId, LoanApplicationRequest};
use super::repository::{LoanApplicationRepository, RepositoryError};
use super::service::{LoanApplicationService, LoanServiceError};
use super::table::{InstallmentEntry, LoanAmount};

/// Router builder exposing the advance calculator and application desk.
pub fn loan_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: LoanApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/loans/table", get(table_handler::<R>))
        .route("/api/v1/loans/eligibility", post(eligibility_handler::<R>))
        .route("/api/v1/loans/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/decision",
            post(decision_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CategoryView {
    pub(crate) key: &'static str,
    pub(crate) label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) principal_cap: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoanTableView {
    pub(crate) entries: Vec<InstallmentEntry>,
    pub(crate) max_deduction_pct: u8,
    pub(crate) categories: Vec<CategoryView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    pub(crate) amount: LoanAmount,
    #[serde(default)]
    pub(crate) salary: u64,
    pub(crate) category: ApplicantCategory,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) approve: bool,
}

pub(crate) async fn table_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
) -> Json<LoanTableView>
where
    R: LoanApplicationRepository + 'static,
{
    let evaluator = service.evaluator();
    let locale = evaluator.locale();
    let categories = ApplicantCategory::ALL
        .into_iter()
        .map(|category| CategoryView {
            key: category.key(),
            label: category.label(locale),
            principal_cap: category.principal_cap(),
        })
        .collect();

    Json(LoanTableView {
        entries: evaluator.table().entries(),
        max_deduction_pct: evaluator.policy().max_deduction_pct,
        categories,
    })
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Json(request): Json<EligibilityRequest>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
{
    let result = service
        .evaluator()
        .evaluate(request.amount, request.salary, request.category);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Json(request): Json<LoanApplicationRequest>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
{
    match service.submit(request) {
        Ok(record) => (StatusCode::ACCEPTED, Json(record.status_view())).into_response(),
        Err(err) => error_response(err, None),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
{
    let id = LoanApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
    Json(request): Json<DecisionRequest>,
) -> Response
where
    R: LoanApplicationRepository + 'static,
{
    let id = LoanApplicationId(application_id);
    match service.decide(&id, request.approve) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

fn error_response(err: LoanServiceError, id: Option<&LoanApplicationId>) -> Response {
    match err {
        LoanServiceError::NotEligible(result) => {
            let payload = json!({
                "error": result.message.clone(),
                "eligibility": result,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        LoanServiceError::UnknownAmount(amount) => {
            let payload = json!({
                "error": err.to_string(),
                "amount": amount,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        LoanServiceError::InvalidTransition { .. } => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        LoanServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.map(|id| id.0.clone()),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        LoanServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "application already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
