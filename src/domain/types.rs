//! Core types used throughout the domain layer
//!
//! This module defines `Periodicity` together with the period rules the
//! streak state machine is built on, and the `DD.MM.YYYY` date format used
//! for everything that leaves the process.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Date format used for storage and display (e.g. `24.01.2024`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Format a date as `DD.MM.YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `DD.MM.YYYY` date
///
/// Surrounding whitespace and quotes are ignored, so values that were
/// JSON-encoded one time too many still parse.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = value.trim().trim_matches('"');
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| DomainError::InvalidDate(format!("'{}': {}", value, e)))
}

/// How often a habit should be performed
///
/// The periodicity decides both how long a period lasts before an
/// unacknowledged miss breaks the streak, and whether a check-off falls into
/// a period that was already satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// Once per calendar day
    Daily,
    /// Once per seven days
    Weekly,
    /// Once per month
    Monthly,
}

impl Periodicity {
    /// Lowercase name used in storage and user input
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
            Periodicity::Monthly => "monthly",
        }
    }

    /// Noun for one period, used in user-facing messages
    pub fn period_noun(&self, count: u32) -> &'static str {
        match (self, count) {
            (Periodicity::Daily, 1) => "day",
            (Periodicity::Daily, _) => "days",
            (Periodicity::Weekly, 1) => "week",
            (Periodicity::Weekly, _) => "weeks",
            (Periodicity::Monthly, 1) => "month",
            (Periodicity::Monthly, _) => "months",
        }
    }

    /// Fixed length of one period
    ///
    /// Monthly periods are always 30 days here; this is the window the decay
    /// check uses, not a calendar month.
    pub fn period_length(&self) -> Duration {
        match self {
            Periodicity::Daily => Duration::days(1),
            Periodicity::Weekly => Duration::days(7),
            Periodicity::Monthly => Duration::days(30),
        }
    }

    /// Whether `today` lies in the same fixed-length period as `last`
    pub fn is_same_period(&self, last: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Periodicity::Daily => last == today,
            Periodicity::Weekly | Periodicity::Monthly => today - last < self.period_length(),
        }
    }

    /// Whether more than one full period has passed between `reference` and `now`
    pub fn has_elapsed(&self, reference: NaiveDate, now: NaiveDate) -> bool {
        now - reference > self.period_length()
    }

    /// Whether a completion on `last` already satisfies the period containing `now`
    ///
    /// Monthly habits use the calendar month here, unlike `has_elapsed`.
    pub fn is_satisfied(&self, last: NaiveDate, now: NaiveDate) -> bool {
        match self {
            Periodicity::Daily | Periodicity::Weekly => self.is_same_period(last, now),
            Periodicity::Monthly => last.year() == now.year() && last.month() == now.month(),
        }
    }

    /// Map the creation menu choice (1, 2 or 3) to a periodicity
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Periodicity::Daily),
            "2" => Some(Periodicity::Weekly),
            "3" => Some(Periodicity::Monthly),
            _ => None,
        }
    }
}

impl FromStr for Periodicity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            "monthly" => Ok(Periodicity::Monthly),
            _ => Err(DomainError::InvalidPeriodicity(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
