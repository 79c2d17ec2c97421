pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::panic_response;
use crate::middleware::{api_key, origin};
use crate::notify::TelegramNotifier;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Result<Router, reqwest::Error> {
    let notifier = TelegramNotifier::new(Duration::from_secs(config.notify_timeout_secs))?;

    match &config.targets.secondary {
        Some(secondary) => tracing::info!(
            "Secondary target enabled for app name '{}'",
            secondary.app_name
        ),
        None => tracing::info!("No secondary target configured"),
    }

    let cors = origin::cors_layer(&config.allowed_origins);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { config, notifier });

    // Layers run bottom-up: panics are caught first, CORS answers preflights
    // before the key check, and the origin gate runs after it.
    let app = Router::new()
        .merge(routes::api_routes())
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            origin::enforce_allow_list,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            api_key::require_api_key,
        ))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state);

    Ok(app)
}
