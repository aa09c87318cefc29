use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Personal details printed on the resume that do not live in the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Fetched at export time; a failing fetch leaves the photo out.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub period: Option<String>,
}

impl ResumeProfile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resume profile at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid resume profile JSON in {}", path.display()))
    }

    /// Contact fields in print order, blanks omitted.
    pub fn contact_items(&self) -> Vec<String> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.website,
            &self.github,
            &self.linkedin,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
    }
}
