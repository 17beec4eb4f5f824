//! Historical completion/miss records
//!
//! Every date in a habit's completed or missed list is one HistoricalRecord.
//! Records are never edited; they exist to feed the statistics engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a record marks a completed or a missed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Completed,
    Missed,
}

/// One completed or missed event of a habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Which habit this record belongs to
    pub habit_name: String,
    /// Day of the event
    pub date: NaiveDate,
    pub kind: RecordKind,
}

impl HistoricalRecord {
    /// Build the records of one habit from its two date lists
    ///
    /// Completions come first, each list keeping its own order.
    pub fn from_history(
        habit_name: &str,
        completed_dates: &[NaiveDate],
        missed_dates: &[NaiveDate],
    ) -> Vec<Self> {
        let completed = completed_dates.iter().map(|date| (*date, RecordKind::Completed));
        let missed = missed_dates.iter().map(|date| (*date, RecordKind::Missed));

        completed
            .chain(missed)
            .map(|(date, kind)| Self {
                habit_name: habit_name.to_string(),
                date,
                kind,
            })
            .collect()
    }

    pub fn is_completed(&self) -> bool {
        self.kind == RecordKind::Completed
    }
}
