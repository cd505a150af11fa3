//! Error types for the HTTP API.
//!
//! Every error renders as `{ "success": false, "error": "<message>" }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use fiche_core::{ExportError, ValidationError};
use fiche_pipeline::{PipelineError, SinkError};
use fiche_store::StoreError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body is not valid JSON or has the wrong shape.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Publishing is not configured")]
    SinkNotConfigured,

    #[error("Publishing failed: {0}")]
    Publish(#[from] SinkError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::InvalidIdentifier(e) => ApiError::InvalidIdentifier(e),
            PipelineError::Store(e) => ApiError::Store(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SinkNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Publish(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) | ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
