//! Error types for the portal server.
//!
//! Remote failures are surfaced verbatim with the remote message attached;
//! nothing here retries. Mapping ambiguity (unknown header, unrecognized
//! image cell) is never an error — the mapper falls back to empty strings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures from the remote spreadsheet datastore.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport-level failure reaching the remote API.
    #[error("spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with an error status.
    #[error("{message}")]
    Remote { status: u16, message: String },
}

/// Request-level errors, mapped onto HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized - Please login first")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    /// A gateway failure, tagged with the operation that was attempted so
    /// the response body matches the shape clients already parse.
    #[error("{context}: {source}")]
    Gateway {
        context: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("{0}")]
    Upload(String),

    #[error("Failed to upload file")]
    UploadFailed(#[from] std::io::Error),
}

impl AppError {
    pub fn gateway(context: &'static str) -> impl FnOnce(GatewayError) -> AppError {
        move |source| AppError::Gateway { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized - Please login first" })),
            )
                .into_response(),
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Gateway { context, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": context, "details": source.to_string() })),
            )
                .into_response(),
            AppError::Upload(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::UploadFailed(source) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to upload file", "details": source.to_string() })),
            )
                .into_response(),
        }
    }
}
