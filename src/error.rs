//! Error types shared by the registry, resolver and gateway.
//!
//! Every variant maps onto one HTTP status so handlers can return
//! `Result<_, FabricError>` and let axum render `{"detail": ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error type for fabric operations
#[derive(Error, Debug)]
pub enum FabricError {
    /// Entity absent.
    #[error("{0}")]
    NotFound(String),

    /// Business rule violated.
    #[error("{0}")]
    InvalidState(String),

    /// No live instance of a service, or the chosen one refused to talk.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The discovery registry itself could not be reached or answered garbage.
    #[error("Discovery registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// A resolved backend could not be reached or failed mid-call.
    #[error("Gateway Error: {0}")]
    GatewayTransport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FabricError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FabricError::NotFound(_) => StatusCode::NOT_FOUND,
            FabricError::InvalidState(_) => StatusCode::BAD_REQUEST,
            FabricError::ServiceUnavailable(_) | FabricError::RegistryUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            FabricError::GatewayTransport(_) | FabricError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for FabricError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Wire shape of every error answered by the platform.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Result type for fabric operations
pub type FabricResult<T> = Result<T, FabricError>;
