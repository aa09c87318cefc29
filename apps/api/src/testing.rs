//! In-memory stand-ins for the external collaborators in `AppState`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::cms::documents::{RawExperience, RawProject, RawTechStackItem};
use crate::cms::images::SanityImageUrls;
use crate::cms::{CmsError, ContentSource};
use crate::resume::document::ResumeDocument;
use crate::resume::language::Language;
use crate::resume::profile::ResumeProfile;
use crate::resume::render::{RenderError, ResumeRenderer};
use crate::state::AppState;
use crate::translation::{TranslatableResume, TranslationError, Translator};

/// The three collections a `ContentSource` serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Experiences,
    TechStack,
}

/// Serves fixed documents; queries for collections listed in `failing` return a 503.
#[derive(Default)]
pub struct StaticContent {
    pub projects: Vec<RawProject>,
    pub experiences: Vec<RawExperience>,
    pub tech_stack: Vec<RawTechStackItem>,
    pub failing: Vec<Collection>,
    pub calls: AtomicUsize,
}

impl StaticContent {
    /// No documents, and the given collections fail.
    pub fn failing(collections: &[Collection]) -> Self {
        Self {
            failing: collections.to_vec(),
            ..Self::default()
        }
    }

    fn check(&self, collection: Collection) -> Result<(), CmsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&collection) {
            return Err(CmsError::Api {
                status: 503,
                message: "dataset unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for StaticContent {
    async fn projects(&self) -> Result<Vec<RawProject>, CmsError> {
        self.check(Collection::Projects)?;
        Ok(self.projects.clone())
    }

    async fn experiences(&self) -> Result<Vec<RawExperience>, CmsError> {
        self.check(Collection::Experiences)?;
        Ok(self.experiences.clone())
    }

    async fn tech_stack(&self) -> Result<Vec<RawTechStackItem>, CmsError> {
        self.check(Collection::TechStack)?;
        Ok(self.tech_stack.clone())
    }
}

/// Upper-cases every role, which is enough to observe that translation ran.
#[derive(Default)]
pub struct ShoutingTranslator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for ShoutingTranslator {
    async fn translate(
        &self,
        content: &TranslatableResume,
        _target: Language,
    ) -> Result<TranslatableResume, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut translated = content.clone();
        for experience in &mut translated.experiences {
            experience.role = experience.role.to_uppercase();
        }
        Ok(translated)
    }
}

/// Records the last document and returns a fixed payload.
#[derive(Default)]
pub struct RecordingRenderer {
    pub last: Mutex<Option<ResumeDocument>>,
    pub fail: bool,
}

impl ResumeRenderer for RecordingRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::Compile("unknown variable: data".to_string()));
        }
        if let Ok(mut last) = self.last.lock() {
            *last = Some(document.clone());
        }
        Ok(b"%PDF-1.7 test".to_vec())
    }
}

pub fn raw_experience(id: &str, role: &str, start: &str, end: Option<&str>) -> RawExperience {
    RawExperience {
        id: Some(id.to_string()),
        company: Some("Acme".to_string()),
        role: Some(role.to_string()),
        start_date: Some(start.to_string()),
        end_date: end.map(str::to_string),
        description: Some(json!("Worked on things.")),
        ..RawExperience::default()
    }
}

pub fn raw_project(title: &str, published_at: Option<&str>) -> RawProject {
    RawProject {
        id: Some(format!("project-{title}")),
        title: Some(title.to_string()),
        description: Some(json!([
            {"_type": "block", "children": [{"_type": "span", "text": "A project."}]}
        ])),
        published_at: published_at.map(str::to_string),
        ..RawProject::default()
    }
}

pub fn raw_tech(name: &str, category: Option<&str>) -> RawTechStackItem {
    RawTechStackItem {
        name: Some(name.to_string()),
        category: category.map(str::to_string),
        ..RawTechStackItem::default()
    }
}

pub fn sample_content() -> StaticContent {
    StaticContent {
        projects: vec![
            raw_project("Older", Some("2021-06-01")),
            raw_project("Undated", None),
            raw_project("Newer", Some("2023-02-01")),
        ],
        experiences: vec![
            raw_experience("exp-1", "Frontend Developer", "2018-01-01", Some("2020-01-01")),
            raw_experience("exp-2", "Backend Engineer", "2020-02-01", None),
        ],
        tech_stack: vec![
            raw_tech("Rust", Some("Languages")),
            raw_tech("React", Some("Frameworks")),
            raw_tech("TypeScript", Some("Languages")),
        ],
        ..StaticContent::default()
    }
}

pub fn sample_profile() -> ResumeProfile {
    ResumeProfile {
        name: "Sam Doe".to_string(),
        title: "Software Engineer".to_string(),
        summary: "Builds things.".to_string(),
        ..ResumeProfile::default()
    }
}

pub struct TestState {
    pub content: Arc<StaticContent>,
    pub translator: Arc<ShoutingTranslator>,
    pub renderer: Arc<RecordingRenderer>,
}

impl TestState {
    pub fn new(content: StaticContent) -> Self {
        Self {
            content: Arc::new(content),
            translator: Arc::new(ShoutingTranslator::default()),
            renderer: Arc::new(RecordingRenderer::default()),
        }
    }

    pub fn app_state(&self, with_translator: bool, profile: ResumeProfile) -> AppState {
        AppState {
            content: self.content.clone(),
            images: Arc::new(SanityImageUrls::new("test-project", "production")),
            translator: if with_translator {
                Some(self.translator.clone() as Arc<dyn Translator>)
            } else {
                None
            },
            renderer: self.renderer.clone(),
            http: reqwest::Client::new(),
            profile: Arc::new(profile),
        }
    }
}
