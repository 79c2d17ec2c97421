use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::notify::NotifyError;

#[derive(Debug)]
pub enum AppError {
    MissingApiKey,
    TokenMismatch,
    OriginRejected,
    Validation { details: Vec<String> },
    MissingFields(Vec<String>),
    MalformedBody(String),
    Delivery {
        context: &'static str,
        source: NotifyError,
    },
    NotFound,
    Internal(String),
}

/// Non-standard "authentication timeout" status used for a wrong key.
pub fn token_mismatch_status() -> StatusCode {
    StatusCode::from_u16(419).unwrap_or(StatusCode::UNAUTHORIZED)
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MissingApiKey => write!(f, "Missing x-api-key in request headers"),
            AppError::TokenMismatch => write!(f, "Token mismatch"),
            AppError::OriginRejected => write!(f, "Not allowed by CORS"),
            AppError::Validation { details } => {
                write!(f, "Validation error: {}", details.join(", "))
            }
            AppError::MissingFields(fields) => write!(f, "Data required: {}", fields.join(", ")),
            AppError::MalformedBody(msg) => write!(f, "Malformed request body: {msg}"),
            AppError::Delivery { context, source } => write!(f, "{context}: {source}"),
            AppError::NotFound => write!(f, "Route not found"),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                json!({ "status": false, "message": self.to_string() }),
            ),
            AppError::TokenMismatch => (
                token_mismatch_status(),
                json!({ "status": false, "message": self.to_string() }),
            ),
            AppError::OriginRejected => (
                StatusCode::FORBIDDEN,
                json!({ "status": false, "message": self.to_string() }),
            ),
            AppError::Validation { details } => (
                StatusCode::BAD_REQUEST,
                json!({ "status": false, "message": "Validation error", "details": details }),
            ),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": false, "message": "Data required", "missingFields": fields }),
            ),
            AppError::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": false, "message": "Malformed request body", "error": msg }),
            ),
            AppError::Delivery { context, source } => {
                tracing::error!("{context}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": false, "message": context, "error": source.to_string() }),
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "status": false, "message": "Route not found" }),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": false, "message": "Internal Server Error", "error": msg }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

/// Turns a handler panic into the generic 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}
