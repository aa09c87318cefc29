//! Metrics Deriver: aggregate experience statistics from employment records.
//!
//! Recomputed from the full record list on every request. The role classifier is a
//! keyword heuristic: a role may count as frontend, backend, both or neither, and
//! generic developer titles split their time evenly between the two buckets.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::content::records::ExperienceRecord;

const DAYS_PER_YEAR: f64 = 365.0;
const HOURS_PER_WORKDAY: u64 = 8;

const FRONTEND_KEYWORDS: &[&str] = &["frontend", "front-end", "front end", "ui", "react"];
const BACKEND_KEYWORDS: &[&str] = &["backend", "back-end", "back end", "server", "api"];
const GENERIC_KEYWORDS: &[&str] = &["developer", "engineer", "full stack", "fullstack"];

/// Whole years plus the rounded remainder in months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearsAndMonths {
    pub years: u32,
    pub months: u32,
}

impl YearsAndMonths {
    /// Floor for years, `round(fraction × 12)` for months. A fraction close to 1
    /// rounds to 12 months rather than carrying into the year.
    pub fn from_years(years: f64) -> Self {
        let years = years.max(0.0);
        let whole = years.floor();
        Self {
            years: whole as u32,
            months: ((years - whole) * 12.0).round() as u32,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Floor of years since the earliest start date.
    pub total_years_experience: u32,
    pub frontend_years: f64,
    pub backend_years: f64,
    pub frontend: YearsAndMonths,
    pub backend: YearsAndMonths,
    /// Weekdays spent in each position × 8h, summed over positions.
    pub hours_worked: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFocus {
    pub frontend: bool,
    pub backend: bool,
    pub generic: bool,
}

/// Case-insensitive substring tests; the three flags are independent.
pub fn classify_role(role: &str) -> RoleFocus {
    let role = role.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| role.contains(k));
    RoleFocus {
        frontend: contains_any(FRONTEND_KEYWORDS),
        backend: contains_any(BACKEND_KEYWORDS),
        generic: contains_any(GENERIC_KEYWORDS),
    }
}

pub fn derive_metrics(records: &[ExperienceRecord]) -> DerivedMetrics {
    derive_metrics_at(records, Utc::now().date_naive())
}

pub fn derive_metrics_at(records: &[ExperienceRecord], now: NaiveDate) -> DerivedMetrics {
    let Some(earliest_start) = records.iter().map(|r| r.start_date).min() else {
        return DerivedMetrics::default();
    };

    let total_years_experience = years_between(earliest_start, now).floor() as u32;

    let mut frontend_years = 0.0_f64;
    let mut backend_years = 0.0_f64;
    let mut hours_worked = 0_u64;

    for record in records {
        let end = record.effective_end(now);
        let years_in_job = years_between(record.start_date, end);
        hours_worked += weekdays_between(record.start_date, end) * HOURS_PER_WORKDAY;

        let focus = classify_role(&record.role);
        if focus.frontend {
            frontend_years += years_in_job;
        }
        if focus.backend {
            backend_years += years_in_job;
        }
        if !focus.frontend && !focus.backend && focus.generic {
            frontend_years += years_in_job * 0.5;
            backend_years += years_in_job * 0.5;
        }
    }

    DerivedMetrics {
        total_years_experience,
        frontend_years,
        backend_years,
        frontend: YearsAndMonths::from_years(frontend_years),
        backend: YearsAndMonths::from_years(backend_years),
        hours_worked,
    }
}

/// Elapsed days / 365. Spans that end before they start count as zero.
fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days().max(0) as f64 / DAYS_PER_YEAR
}

/// Monday–Friday days in `[start, end)`.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> u64 {
    let days = (end - start).num_days();
    if days <= 0 {
        return 0;
    }
    let days = days as u64;
    let full_weeks = days / 7;
    let first_weekday = u64::from(start.weekday().num_days_from_monday());
    let leftover = (0..days % 7)
        .filter(|offset| (first_weekday + offset) % 7 < 5)
        .count() as u64;
    full_weeks * 5 + leftover
}
