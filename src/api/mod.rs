// Thin namespace wrapper for API-layer components
use crate::handlers::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod handlers {
    pub use crate::handlers::*;
}

/// Versioned API routes. Rate limiting and body limits are layered on by the caller.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/filters", get(handlers::get_filter_options))
        .route("/api/v1/dashboard", get(handlers::get_dashboard))
        .route(
            "/api/v1/quotas/:salesperson",
            get(handlers::get_salesperson_quota),
        )
        .route("/api/v1/feed/refresh", post(handlers::refresh_feed))
}

/// Health check (never rate limited) merged with the given API routes.
pub fn app(state: Arc<AppState>, api_routes: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}
