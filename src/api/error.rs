use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("url is required")]
    MissingUrl,
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("format probe failed: {0}")]
    ProbeFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ProbeFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingUrl => "URL_REQUIRED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::ProbeFailed(_) => "PROBE_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(json!(body))).into_response()
    }
}

impl From<crate::runner::RunnerError> for ApiError {
    fn from(value: crate::runner::RunnerError) -> Self {
        use crate::runner::RunnerError;
        match value {
            RunnerError::Spawn { .. } => ApiError::Internal(value.to_string()),
            RunnerError::ProbeFailed(_) | RunnerError::ProbeParse(_) => {
                ApiError::ProbeFailed(value.to_string())
            }
        }
    }
}
