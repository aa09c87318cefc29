use chrono::NaiveDate;
use serde::Serialize;

use crate::content::rich_text::RichText;

/// Display-ready project. `description` is always flat text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub published_year: String,
    pub published_at: Option<NaiveDate>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub repository_url: Option<String>,
    pub tags: Vec<String>,
    pub slug: String,
}

/// A position held. `end_date: None` means ongoing, which is distinct from an
/// end date equal to today.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Kept as plain or rich text; renderers treat the two differently.
    pub description: Option<RichText>,
    pub responsibilities: Vec<String>,
    pub location: Option<String>,
    pub technologies: Vec<String>,
}

impl ExperienceRecord {
    pub fn effective_end(&self, now: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackRecord {
    pub name: String,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

/// Tech stack entries sharing a category, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}
