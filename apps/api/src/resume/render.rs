//! PDF rendering of an assembled resume with an in-process Typst compiler.
//!
//! The template never has text spliced into it. All resume data is serialized to a
//! virtual `resume.json` that the template loads with `json(..)`, and the profile
//! photo is served as a virtual `profile.<ext>` file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::warn;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::content::records::ExperienceRecord;
use crate::content::rich_text::RichText;
use crate::resume::document::ResumeDocument;
use crate::resume::language::Labels;

const DATA_FILE: &str = "resume.json";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Failed to serialize resume data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Turns an assembled resume into PDF bytes. Rendering is CPU-bound and synchronous;
/// callers run it on a blocking thread.
pub trait ResumeRenderer: Send + Sync {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError>;
}

pub struct TypstRenderer {
    fonts: Vec<Font>,
    book: FontBook,
}

impl TypstRenderer {
    /// Loads the bundled fonts once; every render shares them.
    pub fn new() -> Self {
        let fonts: Vec<Font> = typst_assets::fonts()
            .flat_map(|data| Font::iter(Bytes::new(data)))
            .collect();
        let book = FontBook::from_fonts(&fonts);
        Self { fonts, book }
    }
}

impl Default for TypstRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeRenderer for TypstRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
        let mut files = HashMap::new();

        let image_path = match &document.profile_image {
            Some(image) => match (image.extension(), STANDARD.decode(&image.base64)) {
                (Some(ext), Ok(bytes)) => {
                    let path = format!("profile.{ext}");
                    files.insert(PathBuf::from(&path), Bytes::new(bytes));
                    path
                }
                (None, _) => {
                    warn!(mime = %image.mime, "Unsupported profile image type, omitting photo");
                    String::new()
                }
                (_, Err(e)) => {
                    warn!(error = %e, "Profile image is not valid base64, omitting photo");
                    String::new()
                }
            },
            None => String::new(),
        };

        let model = RenderModel::build(document, image_path.clone());
        match self.compile(&model, files.clone()) {
            Err(RenderError::Compile(message)) if !image_path.is_empty() => {
                warn!(error = %message, "Profile image failed to compile, omitting photo");
                files.remove(Path::new(&image_path));
                let model = RenderModel::build(document, String::new());
                self.compile(&model, files)
            }
            result => result,
        }
    }
}

impl TypstRenderer {
    fn compile(
        &self,
        model: &RenderModel,
        mut files: HashMap<PathBuf, Bytes>,
    ) -> Result<Vec<u8>, RenderError> {
        files.insert(PathBuf::from(DATA_FILE), Bytes::new(serde_json::to_vec(model)?));

        let world = ResumeWorld {
            main: Source::detached(RESUME_TEMPLATE),
            book: LazyHash::new(self.book.clone()),
            fonts: self.fonts.clone(),
            library: LazyHash::new(Library::default()),
            files,
        };

        let compiled: PagedDocument = typst::compile(&world).output.map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            RenderError::Compile(messages.join("; "))
        })?;

        typst_pdf::pdf(&compiled, &PdfOptions::default()).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            RenderError::Export(messages.join("; "))
        })
    }
}

/// Compilation environment: one detached main source plus in-memory data files.
struct ResumeWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
    files: HashMap<PathBuf, Bytes>,
}

impl World for ResumeWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        let path: &Path = id.vpath().as_rootless_path();
        if id.package().is_none() {
            if let Some(bytes) = self.files.get(path) {
                return Ok(bytes.clone());
            }
        }
        Err(FileError::NotFound(path.into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Template data
// ============================================================================

/// Flat, display-ready view of a resume. Optional values are empty strings so the
/// template only ever compares against `""`.
#[derive(Debug, Serialize)]
struct RenderModel<'a> {
    name: &'a str,
    title: &'a str,
    contact: Vec<String>,
    image: String,
    summary: &'a str,
    highlights: String,
    labels: &'static Labels,
    experiences: Vec<RenderExperience>,
    projects: Vec<RenderProject<'a>>,
    skills: Vec<RenderSkillGroup<'a>>,
    education: Vec<RenderEducation<'a>>,
    interests: String,
}

#[derive(Debug, Serialize)]
struct RenderExperience {
    role: String,
    company: String,
    period: String,
    location: String,
    paragraphs: Vec<String>,
    bullets: Vec<String>,
    technologies: String,
}

#[derive(Debug, Serialize)]
struct RenderProject<'a> {
    title: &'a str,
    year: &'a str,
    description: &'a str,
    link: &'a str,
    tags: String,
}

#[derive(Debug, Serialize)]
struct RenderSkillGroup<'a> {
    category: &'a str,
    items: String,
}

#[derive(Debug, Serialize)]
struct RenderEducation<'a> {
    degree: &'a str,
    institution: &'a str,
    period: &'a str,
}

impl<'a> RenderModel<'a> {
    fn build(doc: &'a ResumeDocument, image: String) -> Self {
        let language = doc.language;
        let metrics = &doc.metrics;
        let highlights = language.experience_summary(
            metrics.total_years_experience,
            metrics.frontend.years.max(1),
            metrics.backend.years,
        );

        Self {
            name: &doc.profile.name,
            title: &doc.profile.title,
            contact: doc.profile.contact_items(),
            image,
            summary: &doc.profile.summary,
            highlights,
            labels: language.labels(),
            experiences: doc
                .experiences
                .iter()
                .map(|e| RenderExperience::build(e, doc))
                .collect(),
            projects: doc
                .projects
                .iter()
                .map(|p| RenderProject {
                    title: &p.title,
                    year: &p.published_year,
                    description: &p.description,
                    link: p.url.as_deref().or(p.repository_url.as_deref()).unwrap_or(""),
                    tags: p.tags.join(", "),
                })
                .collect(),
            skills: doc
                .skills
                .iter()
                .map(|g| RenderSkillGroup {
                    category: &g.category,
                    items: g.items.join(", "),
                })
                .collect(),
            education: doc
                .profile
                .education
                .iter()
                .map(|e| RenderEducation {
                    degree: &e.degree,
                    institution: &e.institution,
                    period: e.period.as_deref().unwrap_or(""),
                })
                .collect(),
            interests: doc.profile.interests.join(" · "),
        }
    }
}

impl RenderExperience {
    fn build(record: &ExperienceRecord, doc: &ResumeDocument) -> Self {
        let mut paragraphs = Vec::new();
        let mut bullets = Vec::new();

        match &record.description {
            Some(RichText::Plain(text)) if !text.trim().is_empty() => {
                paragraphs.push(text.trim().to_string());
            }
            Some(RichText::Blocks(blocks)) => {
                for block in blocks {
                    let text = block.plain_text();
                    if text.trim().is_empty() {
                        continue;
                    }
                    if block.is_list_item() {
                        bullets.push(text);
                    } else {
                        paragraphs.push(text);
                    }
                }
            }
            _ => {}
        }

        bullets.extend(
            record
                .responsibilities
                .iter()
                .filter(|r| !r.trim().is_empty())
                .cloned(),
        );

        Self {
            role: record.role.clone(),
            company: record.company.clone(),
            period: doc.language.format_period(record.start_date, record.end_date),
            location: record.location.clone().unwrap_or_default(),
            paragraphs,
            bullets,
            technologies: record.technologies.join(", "),
        }
    }
}

// ============================================================================
// Template
// ============================================================================

const RESUME_TEMPLATE: &str = r##"
#let data = json("resume.json")
#let labels = data.labels
#let accent = rgb("#1f3a5f")
#let muted = rgb("#5a5a5a")

#set document(title: data.name)
#set page(paper: "a4", margin: (x: 1.6cm, y: 1.4cm))
#set text(size: 10pt)
#set par(leading: 0.55em)

#let section(title) = {
  v(10pt)
  text(size: 12pt, weight: "bold", fill: accent, upper(title))
  v(-6pt)
  line(length: 100%, stroke: 0.6pt + accent)
}

#grid(
  columns: if data.image != "" { (1fr, 2.8cm) } else { (1fr,) },
  column-gutter: 14pt,
  {
    text(size: 22pt, weight: "bold", data.name)
    linebreak()
    text(size: 12pt, fill: muted, data.title)
    if data.contact.len() > 0 {
      linebreak()
      text(size: 9pt, data.contact.join("  ·  "))
    }
  },
  ..if data.image != "" { (image(data.image, width: 2.8cm),) } else { () },
)

#section(labels.summary)
#if data.summary != "" {
  par(data.summary)
}
#text(weight: "bold", data.highlights)

#if data.experiences.len() > 0 {
  section(labels.experience)
  for job in data.experiences {
    block(width: 100%, above: 8pt, {
      grid(
        columns: (1fr, auto),
        text(weight: "bold", job.role + " · " + job.company),
        text(fill: muted, job.period),
      )
      if job.location != "" {
        text(size: 9pt, fill: muted, job.location)
      }
      for paragraph in job.paragraphs {
        par(paragraph)
      }
      if job.bullets.len() > 0 {
        list(..job.bullets)
      }
      if job.technologies != "" {
        text(size: 9pt, style: "italic", job.technologies)
      }
    })
  }
}

#if data.projects.len() > 0 {
  section(labels.projects)
  for project in data.projects {
    block(width: 100%, above: 8pt, {
      grid(
        columns: (1fr, auto),
        text(weight: "bold", project.title),
        text(fill: muted, project.year),
      )
      if project.description != "" {
        par(project.description)
      }
      if project.link != "" {
        link(project.link, text(size: 9pt, fill: accent, project.link))
        linebreak()
      }
      if project.tags != "" {
        text(size: 9pt, style: "italic", project.tags)
      }
    })
  }
}

#if data.skills.len() > 0 {
  section(labels.skills)
  grid(
    columns: (auto, 1fr),
    column-gutter: 10pt,
    row-gutter: 6pt,
    ..data.skills.map(group => (text(weight: "bold", group.category), text(group.items))).flatten(),
  )
}

#if data.education.len() > 0 {
  section(labels.education)
  for entry in data.education {
    grid(
      columns: (1fr, auto),
      text(weight: "bold", entry.degree),
      text(fill: muted, entry.period),
    )
    text(entry.institution)
  }
}

#if data.interests != "" {
  section(labels.interests)
  text(data.interests)
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::records::{ProjectRecord, SkillGroup};
    use crate::content::rich_text::{Block, Span};
    use crate::metrics::{DerivedMetrics, YearsAndMonths};
    use crate::resume::document::ProfileImage;
    use crate::resume::language::Language;
    use crate::resume::profile::{Education, ResumeProfile};
    use chrono::NaiveDate;

    const ONE_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn block(text: &str, list_item: bool) -> Block {
        Block {
            kind: Some("block".to_string()),
            list_item: list_item.then(|| "bullet".to_string()),
            children: Some(vec![Span {
                text: Some(text.to_string()),
                ..Span::default()
            }]),
            ..Block::default()
        }
    }

    fn sample(language: Language) -> ResumeDocument {
        ResumeDocument {
            language,
            profile: ResumeProfile {
                name: "Sam Doe".to_string(),
                title: "Software Engineer".to_string(),
                summary: "Builds web products end to end.".to_string(),
                email: Some("sam@example.com".to_string()),
                education: vec![Education {
                    degree: "BSc Computer Science".to_string(),
                    institution: "TU Delft".to_string(),
                    period: Some("2012 – 2016".to_string()),
                }],
                interests: vec!["Cycling".to_string(), "Chess".to_string()],
                ..ResumeProfile::default()
            },
            profile_image: None,
            experiences: vec![ExperienceRecord {
                company: "Acme".to_string(),
                role: "Backend Developer".to_string(),
                start_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                end_date: None,
                description: Some(RichText::Blocks(vec![
                    block("Owned the billing platform.", false),
                    block("Cut p99 latency in half", true),
                ])),
                responsibilities: vec!["Code review".to_string(), " ".to_string()],
                location: Some("Amsterdam".to_string()),
                technologies: vec!["Rust".to_string(), "Postgres".to_string()],
            }],
            projects: vec![ProjectRecord {
                title: "Portfolio".to_string(),
                description: "This site.".to_string(),
                published_year: "2023".to_string(),
                published_at: NaiveDate::from_ymd_opt(2023, 5, 1),
                image: None,
                url: None,
                repository_url: Some("https://github.com/sam/portfolio".to_string()),
                tags: vec!["Rust".to_string(), "Typst".to_string()],
                slug: "portfolio".to_string(),
            }],
            skills: vec![SkillGroup {
                category: "Languages".to_string(),
                items: vec!["Rust".to_string(), "TypeScript".to_string()],
            }],
            metrics: DerivedMetrics {
                total_years_experience: 4,
                backend: YearsAndMonths { years: 4, months: 2 },
                ..DerivedMetrics::default()
            },
        }
    }

    #[test]
    fn test_model_splits_paragraphs_and_bullets() {
        let doc = sample(Language::English);
        let model = RenderModel::build(&doc, String::new());
        let job = &model.experiences[0];

        assert_eq!(job.paragraphs, vec!["Owned the billing platform."]);
        assert_eq!(job.bullets, vec!["Cut p99 latency in half", "Code review"]);
        assert_eq!(job.period, "Mar 2020 – Present");
        assert_eq!(job.technologies, "Rust, Postgres");
        assert_eq!(model.projects[0].link, "https://github.com/sam/portfolio");
    }

    #[test]
    fn test_model_highlights_floor_frontend_at_one_year() {
        let doc = sample(Language::Dutch);
        let model = RenderModel::build(&doc, String::new());
        assert_eq!(
            model.highlights,
            "4+ jaar ervaring · 1+ jaar frontend · 4+ jaar backend"
        );
        assert_eq!(model.labels.experience, "Werkervaring");
    }

    #[test]
    fn test_model_serializes_empty_optionals_as_blank_strings() {
        let doc = sample(Language::English);
        let value = serde_json::to_value(RenderModel::build(&doc, String::new())).unwrap();
        assert_eq!(value["image"], "");
        assert_eq!(value["experiences"][0]["location"], "Amsterdam");
        assert_eq!(value["education"][0]["period"], "2012 – 2016");
        assert_eq!(value["labels"]["summary"], "Profile");
    }

    #[test]
    fn test_render_produces_pdf() {
        let pdf = TypstRenderer::new().render(&sample(Language::English)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_embeds_profile_image() {
        let mut doc = sample(Language::Dutch);
        doc.profile_image = Some(ProfileImage {
            mime: "image/png".to_string(),
            base64: ONE_PIXEL_PNG.to_string(),
        });
        let pdf = TypstRenderer::new().render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_skips_undecodable_image() {
        let mut doc = sample(Language::English);
        doc.profile_image = Some(ProfileImage {
            mime: "image/png".to_string(),
            base64: "not base64 at all!".to_string(),
        });
        let pdf = TypstRenderer::new().render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_drops_image_that_fails_to_decode() {
        let mut doc = sample(Language::English);
        doc.profile_image = Some(ProfileImage {
            mime: "image/png".to_string(),
            base64: "AQID".to_string(),
        });
        let pdf = TypstRenderer::new().render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_handles_empty_resume() {
        let doc = ResumeDocument {
            language: Language::English,
            profile: ResumeProfile::default(),
            profile_image: None,
            experiences: vec![],
            projects: vec![],
            skills: vec![],
            metrics: DerivedMetrics::default(),
        };
        let pdf = TypstRenderer::new().render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
