//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clausecheck_analyzer::AnalyzerError;
use clausecheck_store::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;

/// Errors a request handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable
    #[error("{0}")]
    Validation(String),

    /// No analysis with the requested id
    #[error("Analysis not found")]
    NotFound,

    /// The analysis pipeline failed
    #[error("Analysis failed: {0}")]
    Analysis(AnalyzerError),

    /// The record store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AnalyzerError> for ApiError {
    fn from(e: AnalyzerError) -> Self {
        if e.is_validation() {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Analysis(e)
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Analysis(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound => self.to_string(),
            ApiError::Analysis(e) => {
                tracing::error!("Analysis error: {}", e);
                "Error processing contract".to_string()
            }
            ApiError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                "Database error".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
