//! Read-only content endpoints backed directly by the CMS.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::content::records::{ExperienceRecord, ProjectRecord, TechStackRecord};
use crate::content::transform::{
    experiences_newest_first, transform_experiences, transform_projects, transform_tech_stack,
};
use crate::errors::AppError;
use crate::metrics::{derive_metrics, DerivedMetrics};
use crate::state::AppState;

/// GET /api/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectRecord>>, AppError> {
    let raw = state.content.projects().await?;
    Ok(Json(transform_projects(&raw, state.images.as_ref())))
}

/// GET /api/projects/:slug
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectRecord>, AppError> {
    let raw = state.content.projects().await?;
    transform_projects(&raw, state.images.as_ref())
        .into_iter()
        .find(|p| p.slug == slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No project with slug '{slug}'")))
}

/// GET /api/experience
///
/// Newest position first. Documents missing a company, role or start date are
/// left out.
pub async fn handle_list_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExperienceRecord>>, AppError> {
    let raw = state.content.experiences().await?;
    let records = experiences_newest_first(transform_experiences(&raw));
    debug!("{} of {} experience documents usable", records.len(), raw.len());
    Ok(Json(records))
}

/// GET /api/tech-stack
pub async fn handle_list_tech_stack(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechStackRecord>>, AppError> {
    let raw = state.content.tech_stack().await?;
    Ok(Json(transform_tech_stack(&raw, state.images.as_ref())))
}

/// GET /api/metrics
pub async fn handle_get_metrics(
    State(state): State<AppState>,
) -> Result<Json<DerivedMetrics>, AppError> {
    let raw = state.content.experiences().await?;
    Ok(Json(derive_metrics(&transform_experiences(&raw))))
}
