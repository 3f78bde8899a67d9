use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::server::handlers;
use crate::server::state::AppState;

/// Largest accepted request body (base64 reference voices included).
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn create_router(state: AppState, trace_requests: bool) -> Router {
    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/api/info", get(handlers::info))
        .route("/api/status", post(handlers::status))
        .route("/api/generate", post(handlers::generate))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let router = if trace_requests { router.layer(TraceLayer::new_for_http()) } else { router };
    router.with_state(state)
}
