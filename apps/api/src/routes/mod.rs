pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimize::handlers as optimize;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job-based optimization
        .route("/api/v1/jobs/:id/optimize", post(optimize::handle_optimize_job))
        .route(
            "/api/v1/jobs/:id/comparison",
            post(optimize::handle_generate_comparison),
        )
        // Suggestion lifecycle
        .route(
            "/api/v1/jobs/:id/suggestions",
            post(suggestions::handle_generate_suggestions),
        )
        .route(
            "/api/v1/jobs/:id/suggestions/apply",
            post(suggestions::handle_apply_suggestions),
        )
        // Plain resume optimization (no posting)
        .route(
            "/api/v1/resumes/:id/optimize",
            post(optimize::handle_optimize_resume),
        )
        .with_state(state)
}
