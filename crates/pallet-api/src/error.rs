//! # API Errors
//!
//! Every failure leaving a handler is an `ApiError`, rendered as
//! `{"error": <message>, "code": <status>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pallet_core::PricingError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Pricing rejected the request or failed evaluating it
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Webhook signature missing or wrong
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Body is not a JSON object
    #[error("Malformed request body: {0}")]
    MalformedRequestBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pricing(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Unauthenticated(_) => StatusCode::FORBIDDEN,
            ApiError::MalformedRequestBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request_failed");
        }

        let body = ErrorResponse::new(self.to_string(), status.as_u16());
        (status, Json(body)).into_response()
    }
}
