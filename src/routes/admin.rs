use axum::extract::State;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::Value;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{self, message, schema};

use super::{deliver, sent};

pub async fn alert(
    State(state): State<SharedState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> Result<Json<Value>, AppError> {
    let field = |key: &str| submission::text_of(body.get(key));
    let text = message::alert(&field("appName"), &field("country"), &field("browser"));

    deliver(
        &state,
        submission::app_name(&body),
        &text,
        "Error sending visit messages",
    )
    .await?;

    Ok(sent())
}

pub async fn notification(
    State(state): State<SharedState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> Result<Json<Value>, AppError> {
    let missing = schema::ADMIN_NOTIFICATION.violations(&body, false);
    if !missing.is_empty() {
        tracing::debug!("Admin notification missing fields: {missing:?}");
        return Err(AppError::MissingFields(missing));
    }

    let text = message::admin_notification(
        &submission::text_of(body.get("appName")),
        &submission::text_of(body.get("note")),
    );

    deliver(
        &state,
        submission::app_name(&body),
        &text,
        "Error sending notification message",
    )
    .await?;

    Ok(sent())
}
