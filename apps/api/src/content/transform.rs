//! Content Transform: maps raw CMS documents to display-ready records.
//!
//! Never fails on incomplete content: each field degrades to its default on its own.
//! The one exception is experience, where a document without company, role or a
//! usable date range cannot form a record and is skipped with a warning.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::warn;

use crate::cms::documents::{ImageSource, RawExperience, RawProject, RawTechStackItem};
use crate::content::records::{ExperienceRecord, ProjectRecord, SkillGroup, TechStackRecord};
use crate::content::rich_text::{flatten_description, RichText};

/// Category used for tech stack entries that have none.
pub const UNCATEGORIZED: &str = "Other";

/// Turns an image reference into a URL. Implemented by the CMS image builder.
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, image: &ImageSource) -> Option<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

/// One record per input document, in input order.
pub fn transform_projects(raw: &[RawProject], images: &dyn ImageResolver) -> Vec<ProjectRecord> {
    let current_year = Utc::now().year();
    raw.iter()
        .map(|p| transform_project(p, images, current_year))
        .collect()
}

pub fn transform_project(
    raw: &RawProject,
    images: &dyn ImageResolver,
    current_year: i32,
) -> ProjectRecord {
    let title = raw.title.clone().unwrap_or_default();
    let published_at = raw.published_at.as_deref().and_then(parse_cms_date);
    let published_year = published_at
        .map(|d| d.year())
        .unwrap_or(current_year)
        .to_string();
    let slug = raw
        .slug
        .as_ref()
        .and_then(|s| s.current())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slugify(&title));

    ProjectRecord {
        description: flatten_description(raw.description.as_ref()),
        published_year,
        published_at,
        image: raw.image.as_ref().and_then(|img| images.resolve(img)),
        url: non_empty(raw.url.as_deref()),
        repository_url: non_empty(raw.repository_url.as_deref()),
        tags: raw.tags.clone().unwrap_or_default(),
        slug,
        title,
    }
}

/// Lower-cases and replaces whitespace runs with `-`. `"My Cool App"` → `"my-cool-app"`.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Projects with a publication date, newest first. Undated projects are dropped.
pub fn published_projects(records: Vec<ProjectRecord>) -> Vec<ProjectRecord> {
    let mut dated: Vec<ProjectRecord> = records
        .into_iter()
        .filter(|p| p.published_at.is_some())
        .collect();
    dated.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    dated
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn transform_experiences(raw: &[RawExperience]) -> Vec<ExperienceRecord> {
    raw.iter().filter_map(transform_experience).collect()
}

pub fn transform_experience(raw: &RawExperience) -> Option<ExperienceRecord> {
    let label = raw.id.as_deref().unwrap_or("<no id>");

    let (Some(company), Some(role)) = (
        non_empty(raw.company.as_deref()),
        non_empty(raw.role.as_deref()),
    ) else {
        warn!("Skipping experience {label}: company and role are required");
        return None;
    };

    let Some(start_date) = raw.start_date.as_deref().and_then(parse_cms_date) else {
        warn!("Skipping experience {label}: missing or unreadable startDate");
        return None;
    };

    let end_date = raw.end_date.as_deref().and_then(parse_cms_date);
    if matches!(end_date, Some(end) if end < start_date) {
        warn!("Skipping experience {label}: endDate precedes startDate");
        return None;
    }

    Some(ExperienceRecord {
        company,
        role,
        start_date,
        end_date,
        description: raw.description.as_ref().and_then(RichText::from_value),
        responsibilities: raw.responsibilities.clone().unwrap_or_default(),
        location: non_empty(raw.location.as_deref()),
        technologies: raw.technologies.clone().unwrap_or_default(),
    })
}

pub fn experiences_newest_first(mut records: Vec<ExperienceRecord>) -> Vec<ExperienceRecord> {
    records.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    records
}

// ────────────────────────────────────────────────────────────────────────────
// Tech stack
// ────────────────────────────────────────────────────────────────────────────

/// Entries without a name are dropped; everything else keeps CMS order.
pub fn transform_tech_stack(
    raw: &[RawTechStackItem],
    images: &dyn ImageResolver,
) -> Vec<TechStackRecord> {
    raw.iter()
        .filter_map(|item| {
            let name = non_empty(item.name.as_deref())?;
            Some(TechStackRecord {
                name,
                category: non_empty(item.category.as_deref()),
                icon: item.icon.as_ref().and_then(|img| images.resolve(img)),
                order: item.order,
            })
        })
        .collect()
}

pub fn group_tech_stack(records: &[TechStackRecord]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for record in records {
        let category = record.category.as_deref().unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.items.push(record.name.clone()),
            None => groups.push(SkillGroup {
                category: category.to_string(),
                items: vec![record.name.clone()],
            }),
        }
    }
    groups
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn parse_cms_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // Timestamps carry the calendar date as their prefix.
    if let Ok((date, _)) = NaiveDate::parse_and_remainder(value, "%Y-%m-%d") {
        return Some(date);
    }
    let (year, month) = match value.split_once('-') {
        Some((y, m)) => (y, m.parse::<u32>().ok()?),
        None => (value, 1),
    };
    if year.len() != 4 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
