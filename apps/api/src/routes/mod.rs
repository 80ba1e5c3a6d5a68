pub mod export;
pub mod health;
pub mod resume;
pub mod wizard;

use axum::{
    http::Uri,
    routing::{get, patch, post, put},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume document
        .route("/api/v1/resume", get(resume::handle_get_resume))
        .route(
            "/api/v1/resume/personal-info",
            patch(resume::handle_set_personal_info),
        )
        .route("/api/v1/resume/template", put(resume::handle_set_template))
        .route("/api/v1/resume/reset", post(resume::handle_reset))
        .route("/api/v1/resume/education", post(resume::education::create))
        .route(
            "/api/v1/resume/education/:id",
            patch(resume::education::update).delete(resume::education::remove),
        )
        .route("/api/v1/resume/experience", post(resume::experience::create))
        .route(
            "/api/v1/resume/experience/:id",
            patch(resume::experience::update).delete(resume::experience::remove),
        )
        .route("/api/v1/resume/skills", post(resume::skills::create))
        .route(
            "/api/v1/resume/skills/:id",
            patch(resume::skills::update).delete(resume::skills::remove),
        )
        .route("/api/v1/resume/projects", post(resume::projects::create))
        .route(
            "/api/v1/resume/projects/:id",
            patch(resume::projects::update).delete(resume::projects::remove),
        )
        // Wizard navigation
        .route("/api/v1/wizard", get(wizard::handle_get_wizard))
        .route("/api/v1/wizard/next", post(wizard::handle_next))
        .route("/api/v1/wizard/prev", post(wizard::handle_prev))
        .route("/api/v1/wizard/step", put(wizard::handle_set_step))
        // Templates, preview and export
        .route("/api/v1/templates", get(export::handle_list_templates))
        .route("/api/v1/preview", get(export::handle_preview))
        .route("/api/v1/export", post(export::handle_export))
        .fallback(not_found)
        .with_state(state)
}
