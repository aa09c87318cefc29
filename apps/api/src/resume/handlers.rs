//! Axum route handler for the resume export.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::content::transform::slugify;
use crate::errors::AppError;
use crate::resume::assembler::generate_resume_pdf;
use crate::resume::language::Language;
use crate::state::AppState;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Deserialize)]
pub struct ResumeQuery {
    pub lang: Option<String>,
}

/// GET /api/resume?lang=english|dutch
///
/// Streams a freshly rendered PDF. A missing `lang` means English.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(query): Query<ResumeQuery>,
) -> Result<Response, AppError> {
    let language = match query.lang.as_deref() {
        None | Some("") => Language::default(),
        Some(raw) => raw.parse::<Language>().map_err(AppError::Validation)?,
    };

    let pdf = generate_resume_pdf(&state, language).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        download_filename(&state.profile.name, language)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, NO_CACHE.to_string()),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}

/// Header values must stay ASCII, so non-ASCII letters are dropped from the slug.
fn download_filename(name: &str, language: Language) -> String {
    let ascii: String = slugify(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let slug = ascii
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        format!("resume-{language}.pdf")
    } else {
        format!("{slug}-resume-{language}.pdf")
    }
}
