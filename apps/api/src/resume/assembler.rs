//! Resume Assembler: gathers CMS content, derived metrics and the local profile into
//! a `ResumeDocument`, translates it when asked, and renders the PDF.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cms::CmsError;
use crate::content::transform::{
    experiences_newest_first, group_tech_stack, published_projects, transform_experiences,
    transform_projects, transform_tech_stack,
};
use crate::metrics::derive_metrics;
use crate::resume::document::{ProfileImage, ResumeDocument};
use crate::resume::language::Language;
use crate::resume::render::RenderError;
use crate::state::AppState;
use crate::translation::TranslationError;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("ANTHROPIC_API_KEY is not configured, cannot produce a {0} resume")]
    MissingTranslationKey(Language),

    #[error("Failed to fetch resume content: {0}")]
    Fetch(#[from] CmsError),

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Builds and renders a resume. Errors surface before any CMS traffic when the
/// language needs a translator that is not configured.
pub async fn generate_resume_pdf(
    state: &AppState,
    language: Language,
) -> Result<Vec<u8>, ResumeError> {
    let generation_id = Uuid::new_v4();
    let started = Instant::now();
    info!("Generating {language} resume (generation {generation_id})");

    let document = assemble_resume(state, language).await?;

    let renderer = Arc::clone(&state.renderer);
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&document)).await??;

    info!(
        "Resume {generation_id} rendered: {} bytes in {}ms",
        pdf.len(),
        started.elapsed().as_millis()
    );
    Ok(pdf)
}

pub async fn assemble_resume(
    state: &AppState,
    language: Language,
) -> Result<ResumeDocument, ResumeError> {
    let translator = if language.needs_translation() {
        Some(
            state
                .translator
                .clone()
                .ok_or(ResumeError::MissingTranslationKey(language))?,
        )
    } else {
        None
    };

    let (raw_experiences, raw_projects, raw_stack) = tokio::try_join!(
        state.content.experiences(),
        state.content.projects(),
        state.content.tech_stack(),
    )?;

    let experiences = experiences_newest_first(transform_experiences(&raw_experiences));
    let projects = published_projects(transform_projects(&raw_projects, state.images.as_ref()));
    let skills = group_tech_stack(&transform_tech_stack(&raw_stack, state.images.as_ref()));
    let metrics = derive_metrics(&experiences);

    info!(
        "Resume content: {} experiences, {} projects, {} skill groups",
        experiences.len(),
        projects.len(),
        skills.len()
    );

    let profile_image = match state.profile.image_url.as_deref() {
        Some(url) => match fetch_profile_image(&state.http, url).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("Profile image unavailable, continuing without it: {e:#}");
                None
            }
        },
        None => None,
    };

    let mut document = ResumeDocument {
        language,
        profile: state.profile.as_ref().clone(),
        profile_image,
        experiences,
        projects,
        skills,
        metrics,
    };

    if let Some(translator) = translator {
        let translated = translator
            .translate(&document.translatable(), language)
            .await?;
        document.apply_translation(translated);
    }

    Ok(document)
}

/// Downloads an image and base64-encodes it. The MIME type comes from the
/// `Content-Type` header, falling back to the URL's file extension.
pub async fn fetch_profile_image(http: &reqwest::Client, url: &str) -> anyhow::Result<ProfileImage> {
    let response = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to request {url}"))?
        .error_for_status()
        .with_context(|| format!("Image request to {url} was rejected"))?;

    let header_mime = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|mime| ProfileImage::extension_for(mime).is_some());

    let mime = header_mime
        .or_else(|| mime_from_url(url).map(str::to_string))
        .with_context(|| format!("Unsupported image type at {url}"))?;

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read image body from {url}"))?;
    if bytes.is_empty() {
        bail!("Image at {url} is empty");
    }

    Ok(ProfileImage {
        mime,
        base64: STANDARD.encode(&bytes),
    })
}

fn mime_from_url(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next()?;
    let (_, ext) = path.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
