//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ragassist_core::AppError;
use serde_json::json;

/// Errors surfaced to HTTP clients as JSON bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Body absent, not JSON, or without a string `question`
    MissingQuestion,
    /// Question blank after trimming
    EmptyQuestion,
    /// Language model call failed
    Llm(String),
    /// Anything else
    Internal(String),
    NotFound,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Input(_) => ApiError::EmptyQuestion,
            AppError::Llm(msg) => ApiError::Llm(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingQuestion => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing question parameter",
                    "usage": { "question": "Your question here" }
                }),
            ),
            ApiError::EmptyQuestion => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Question cannot be empty" }),
            ),
            ApiError::Llm(message) => {
                tracing::error!("Language model request failed: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Language model request failed", "message": message }),
                )
            }
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "message": message }),
                )
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Endpoint not found" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
