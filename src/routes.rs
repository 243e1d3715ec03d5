//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /webhook` - Telegram update delivery (secret token checked when configured)
//! - `GET  /health`  - Health check: database, shortener (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Webhook auth** - `X-Telegram-Bot-Api-Secret-Token` verification
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, webhook_handler};
use crate::api::middleware::{tracing, webhook_auth};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and middleware without path normalization.
pub fn router(state: AppState) -> Router {
    let webhook = Router::new()
        .route("/webhook", post(webhook_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            webhook_auth::layer,
        ));

    Router::new()
        .merge(webhook)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
