use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Target language of an exported resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Dutch,
}

/// Static headings and words used by the renderer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Labels {
    pub summary: &'static str,
    pub experience: &'static str,
    pub projects: &'static str,
    pub skills: &'static str,
    pub education: &'static str,
    pub interests: &'static str,
    #[serde(skip)]
    pub present: &'static str,
    #[serde(skip)]
    pub months: [&'static str; 12],
}

const ENGLISH_LABELS: Labels = Labels {
    summary: "Profile",
    experience: "Experience",
    projects: "Projects",
    skills: "Skills",
    education: "Education",
    interests: "Interests",
    present: "Present",
    months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};

const DUTCH_LABELS: Labels = Labels {
    summary: "Profiel",
    experience: "Werkervaring",
    projects: "Projecten",
    skills: "Vaardigheden",
    education: "Opleiding",
    interests: "Interesses",
    present: "heden",
    months: [
        "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
    ],
};

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Dutch => "dutch",
        }
    }

    /// Name used when instructing the translator.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Dutch => "Dutch",
        }
    }

    pub fn needs_translation(&self) -> bool {
        *self != Language::English
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH_LABELS,
            Language::Dutch => &DUTCH_LABELS,
        }
    }

    pub fn format_month(&self, date: NaiveDate) -> String {
        let month = self.labels().months[date.month0() as usize];
        format!("{month} {}", date.year())
    }

    /// `"Jan 2020 – Present"` / `"jan 2020 – heden"`.
    pub fn format_period(&self, start: NaiveDate, end: Option<NaiveDate>) -> String {
        let end = match end {
            Some(end) => self.format_month(end),
            None => self.labels().present.to_string(),
        };
        format!("{} – {end}", self.format_month(start))
    }

    pub fn experience_summary(&self, total_years: u32, frontend: u32, backend: u32) -> String {
        match self {
            Language::English => format!(
                "{total_years}+ years of experience · {frontend}+ years frontend · {backend}+ years backend"
            ),
            Language::Dutch => format!(
                "{total_years}+ jaar ervaring · {frontend}+ jaar frontend · {backend}+ jaar backend"
            ),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "dutch" | "nl" => Ok(Language::Dutch),
            other => Err(format!(
                "unsupported language '{other}', expected 'english' or 'dutch'"
            )),
        }
    }
}
