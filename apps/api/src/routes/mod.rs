pub mod content;
pub mod health;

use axum::{routing::get, Router};

use crate::resume::handlers::handle_get_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content API
        .route("/api/projects", get(content::handle_list_projects))
        .route("/api/projects/:slug", get(content::handle_get_project))
        .route("/api/experience", get(content::handle_list_experience))
        .route("/api/tech-stack", get(content::handle_list_tech_stack))
        .route("/api/metrics", get(content::handle_get_metrics))
        // Resume export
        .route("/api/resume", get(handle_get_resume))
        .with_state(state)
}
