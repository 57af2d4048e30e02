use crate::interface_adapters::handlers::{followage, health};
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/health", get(health))
        .route("/twitch/followage/{streamer}/{viewer}", get(followage))
        .with_state(state)
}
