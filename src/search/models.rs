//! Search criteria, report and error models

use crate::results::{Candidate, MonthFailure, MonthTiming};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How far back the default "recent starters" window reaches, in steps of
/// 30 days
pub const RECENT_WINDOW: std::ops::RangeInclusive<i64> = 4..=6;

/// Terminal failures: no provider call is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("No API key available. Enter your SerpApi key to begin searching")]
    MissingCredential,
    #[error("Select at least one month to search")]
    NoMonthsSelected,
    #[error("Year must be a 4-digit value, got {0}")]
    InvalidYear(i32),
    #[error("Year must be a 4-digit value, got \"{0}\"")]
    YearNotANumber(String),
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
}

/// User-chosen parameters driving one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    title: String,
    company: String,
    months: Vec<Month>,
    year: i32,
    extract_contacts: bool,
}

impl SearchCriteria {
    /// Build criteria, validating the year
    ///
    /// Repeated months are searched once, in first-seen order. An empty month
    /// list is accepted here and rejected when the search runs.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        months: Vec<Month>,
        year: i32,
        extract_contacts: bool,
    ) -> Result<Self, SearchError> {
        if !(1000..=9999).contains(&year) {
            return Err(SearchError::InvalidYear(year));
        }

        let mut unique = Vec::with_capacity(months.len());
        for month in months {
            if !unique.contains(&month) {
                unique.push(month);
            }
        }

        Ok(Self {
            title: title.into(),
            company: company.into(),
            months: unique,
            year,
            extract_contacts,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn extract_contacts(&self) -> bool {
        self.extract_contacts
    }

    /// `"<Month> <Year>"` label for one of the target months
    pub fn month_label(&self, month: Month) -> String {
        format!("{} {}", month.name(), self.year)
    }
}

/// Parse month names such as `"August"` or `"aug"`
pub fn parse_months<S: AsRef<str>>(names: &[S]) -> Result<Vec<Month>, SearchError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref().trim();
            Month::from_str(name).map_err(|_| SearchError::UnknownMonth(name.to_string()))
        })
        .collect()
}

/// All twelve months, January first
pub fn all_months() -> Vec<Month> {
    (1u8..=12).filter_map(|n| Month::try_from(n).ok()).collect()
}

/// Months that were 4, 5 and 6 months before `today`, each with its year
pub fn recent_start_months(today: NaiveDate) -> Vec<(Month, i32)> {
    RECENT_WINDOW
        .filter_map(|step| {
            let date = today - chrono::Duration::days(30 * step);
            let month = Month::try_from(date.month() as u8).ok()?;
            Some((month, date.year()))
        })
        .collect()
}

/// Outcome of one search run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchReport {
    pub title: String,
    pub company: String,
    pub year: i32,
    /// Queries issued, in order
    pub queries: Vec<String>,
    /// Deduplicated candidates in first-seen order
    pub candidates: Vec<Candidate>,
    /// Months whose provider call failed
    pub failures: Vec<MonthFailure>,
    pub timings: Vec<MonthTiming>,
    /// Results dropped because their profile was already listed
    pub duplicates: usize,
}

impl SearchReport {
    /// True when the run produced no candidates at all
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
