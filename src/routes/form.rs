use axum::extract::State;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde_json::Value;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{self, crawler, message, schema, user_agent, Submission};

use super::{deliver, sent};

const VISIT_CONTEXT: &str = "Error sending visit messages";

pub async fn submit(
    State(state): State<SharedState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> Result<Json<Value>, AppError> {
    let agent = submission::text_of(body.get("agent"));
    let details = schema::VISITOR_EVENT.violations(&body, crawler::is_crawler_signature(&agent));
    if !details.is_empty() {
        tracing::debug!("Visitor event rejected: {details:?}");
        return Err(AppError::Validation { details });
    }

    let sub = Submission::from_body(&body);
    let is_crawler = crawler::is_google_agent(&sub.agent);
    let ua = user_agent::parse(&sub.agent);
    let when = message::event_time(sub.date.as_ref());

    tracing::info!(
        app = %sub.app_name,
        crawler = is_crawler,
        vpn = ?sub.vpn_detected,
        "Visitor event from {}",
        sub.location.ip_address
    );

    let text = message::visitor_event(&sub, &ua, &when, is_crawler);
    deliver(&state, submission::app_name(&body), &text, VISIT_CONTEXT).await?;

    Ok(sent())
}

pub async fn note(
    State(state): State<SharedState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, AppError>,
) -> Result<Json<Value>, AppError> {
    let field = |key: &str| submission::text_of(body.get(key));
    let text = message::note(
        &field("appName"),
        &field("country"),
        &field("browser"),
        &field("note"),
    );

    deliver(&state, submission::app_name(&body), &text, VISIT_CONTEXT).await?;

    Ok(sent())
}
