use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::http::{HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;
use crate::middleware::api_key::API_KEY_HEADER;
use crate::state::SharedState;

/// CORS headers and preflight answers for the configured origins.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Ignoring unusable allowed origin '{o}': {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static(API_KEY_HEADER),
        ])
}

/// Refuses cross-origin requests from origins outside the allow-list.
/// Requests without an `Origin` header pass.
pub async fn enforce_allow_list(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req.headers().get(ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| state.config.allowed_origins.iter().any(|a| a == o))
            .unwrap_or(false);
        if !allowed {
            tracing::warn!("Rejected request from origin {origin:?}");
            return AppError::OriginRejected.into_response();
        }
    }

    next.run(req).await
}
