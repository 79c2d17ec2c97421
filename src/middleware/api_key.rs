use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::SharedState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects any request whose `x-api-key` does not equal the shared secret.
pub async fn require_api_key(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(presented) = req.headers().get(API_KEY_HEADER) else {
        tracing::warn!("Rejected {} {}: missing api key", req.method(), req.uri().path());
        return AppError::MissingApiKey.into_response();
    };

    if !keys_match(presented.as_bytes(), state.config.secret_key.as_bytes()) {
        tracing::warn!("Rejected {} {}: api key mismatch", req.method(), req.uri().path());
        return AppError::TokenMismatch.into_response();
    }

    next.run(req).await
}

fn keys_match(presented: &[u8], secret: &[u8]) -> bool {
    presented.ct_eq(secret).into()
}
