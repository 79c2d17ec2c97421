pub mod admin;
pub mod form;

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::notify;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Visitor-facing forms
        .route("/api/form/submit", post(form::submit))
        .route("/api/form/note", post(form::note))
        // Admin
        .route("/api/admin/alert", post(admin::alert))
        .route("/api/admin/notification", post(admin::notification))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn sent() -> Json<Value> {
    Json(json!({ "status": true, "message": "sent" }))
}

/// Forward `text` to the target picked by `app_name`.
async fn deliver(
    state: &SharedState,
    app_name: Option<&str>,
    text: &str,
    context: &'static str,
) -> Result<(), AppError> {
    let target = notify::resolve(&state.config.targets, app_name);
    tracing::debug!("Forwarding message to {}: {text}", target.redacted_url());

    state
        .notifier
        .send(target, text)
        .await
        .map_err(|source| AppError::Delivery { context, source })?;

    Ok(())
}
