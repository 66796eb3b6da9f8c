pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS API
        .route(
            "/api/v1/ats/keywords",
            post(handlers::handle_extract_keywords),
        )
        .route("/api/v1/ats/match", post(handlers::handle_match_keywords))
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .layer(body_limit)
        .with_state(state)
}
