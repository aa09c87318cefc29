use std::sync::Arc;

use crate::cms::ContentSource;
use crate::content::transform::ImageResolver;
use crate::resume::profile::ResumeProfile;
use crate::resume::render::ResumeRenderer;
use crate::translation::Translator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentSource>,
    pub images: Arc<dyn ImageResolver>,
    /// `None` when no translation credential is configured; English still works.
    pub translator: Option<Arc<dyn Translator>>,
    pub renderer: Arc<dyn ResumeRenderer>,
    /// Plain client for fetching the profile photo.
    pub http: reqwest::Client,
    pub profile: Arc<ResumeProfile>,
}
