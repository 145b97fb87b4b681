use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
};
use std::sync::Arc;

use super::error::LoanError;
use super::orchestrator::LoanOrchestrator;
use super::types::{LoanRecord, NewLoan, ReturnConfirmation};

pub fn router(orchestrator: Arc<LoanOrchestrator>) -> Router {
    Router::new()
        .route("/loans", post(handle_issue_loan))
        .route("/loans/:id/return", put(handle_return_loan))
        .route("/loans/history/:reader_id", get(handle_history))
        .route("/loans/active", get(handle_active_loans))
        .layer(Extension(orchestrator))
}

pub async fn handle_issue_loan(
    Extension(orchestrator): Extension<Arc<LoanOrchestrator>>,
    Json(loan): Json<NewLoan>,
) -> Result<(StatusCode, Json<LoanRecord>), LoanError> {
    let record = orchestrator.issue_loan(loan.book_id, loan.reader_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn handle_return_loan(
    Extension(orchestrator): Extension<Arc<LoanOrchestrator>>,
    Path(id): Path<u64>,
) -> Result<Json<ReturnConfirmation>, LoanError> {
    orchestrator.return_loan(id).await.map(Json)
}

pub async fn handle_history(
    Extension(orchestrator): Extension<Arc<LoanOrchestrator>>,
    Path(reader_id): Path<u64>,
) -> Json<Vec<LoanRecord>> {
    Json(orchestrator.history(reader_id).await)
}

pub async fn handle_active_loans(
    Extension(orchestrator): Extension<Arc<LoanOrchestrator>>,
) -> Json<Vec<LoanRecord>> {
    Json(orchestrator.active().await)
}
