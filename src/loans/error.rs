use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::{ErrorBody, FabricError};

/// Failures of the loan workflow.
///
/// Business-rule failures are `400`/`404`; anything that went wrong while locating or
/// talking to another service keeps the status of the wrapped `FabricError`.
#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Reader not found in Reader Service")]
    ReaderNotFound(u64),

    #[error("Reader is blocked")]
    ReaderBlocked(u64),

    #[error("Book not found in Catalog")]
    BookNotFound(u64),

    #[error("Book is already loaned")]
    BookUnavailable(u64),

    #[error("Active loan record not found")]
    LoanNotFound(u64),

    #[error(transparent)]
    Fabric(#[from] FabricError),
}

impl LoanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LoanError::ReaderNotFound(_) | LoanError::BookNotFound(_) | LoanError::LoanNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LoanError::ReaderBlocked(_) | LoanError::BookUnavailable(_) => StatusCode::BAD_REQUEST,
            LoanError::Fabric(e) => e.status_code(),
        }
    }
}

impl IntoResponse for LoanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!("Loan request rejected ({}): {:?}", status, self);
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
