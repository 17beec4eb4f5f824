//! Statistics engine for completion-rate series
//!
//! This module turns the completed/missed history of habits into per-date
//! completion rates that the chart renderer can draw.

pub mod chart;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::HistoricalRecord;
use crate::storage::HabitRepository;
use crate::TrackerError;

/// Completion rate on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionPoint {
    pub date: NaiveDate,
    /// Rate between 0.0 and 1.0
    pub rate: f64,
}

/// Completed and missed counts for one date
#[derive(Debug, Default, Clone, Copy)]
struct DayTally {
    completed: u32,
    missed: u32,
}

/// Statistics engine for processing habit history
///
/// Reads historical records straight from the repository, independent of
/// the registry's in-memory state.
#[derive(Debug, Default)]
pub struct StatisticsEngine {}

impl StatisticsEngine {
    /// Create a new statistics engine
    pub fn new() -> Self {
        Self {}
    }

    /// Completion-rate series for one habit
    ///
    /// Fails with `NotFound` when the habit has no records at all.
    pub fn series_for<S: HabitRepository>(
        &self,
        storage: &S,
        habit_name: &str,
    ) -> Result<Vec<CompletionPoint>, TrackerError> {
        let records = storage.load_records(habit_name)?;
        if records.is_empty() {
            return Err(TrackerError::NotFound(habit_name.to_string()));
        }

        tracing::debug!("Building series for '{}' from {} records", habit_name, records.len());
        Ok(Self::habit_series(&records))
    }

    /// Combined completion-rate series over every habit
    pub fn series_for_all<S: HabitRepository>(
        &self,
        storage: &S,
    ) -> Result<Vec<CompletionPoint>, TrackerError> {
        let records = storage.load_all_records()?;
        tracing::debug!("Building combined series from {} records", records.len());
        Ok(Self::combined_series(&records))
    }

    /// Rate per date = completions on that date / all records of the habit
    pub fn habit_series(records: &[HistoricalRecord]) -> Vec<CompletionPoint> {
        let total = records.len() as f64;
        if total == 0.0 {
            return Vec::new();
        }

        Self::tally(records)
            .into_iter()
            .map(|(date, tally)| CompletionPoint {
                date,
                rate: tally.completed as f64 / total,
            })
            .collect()
    }

    /// Rate per date = completions on that date / records on that date
    pub fn combined_series(records: &[HistoricalRecord]) -> Vec<CompletionPoint> {
        Self::tally(records)
            .into_iter()
            .map(|(date, tally)| {
                let day_total = tally.completed + tally.missed;
                let rate = if day_total > 0 {
                    tally.completed as f64 / day_total as f64
                } else {
                    0.0
                };
                CompletionPoint { date, rate }
            })
            .collect()
    }

    fn tally(records: &[HistoricalRecord]) -> BTreeMap<NaiveDate, DayTally> {
        let mut days: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();
        for record in records {
            let tally = days.entry(record.date).or_default();
            if record.is_completed() {
                tally.completed += 1;
            } else {
                tally.missed += 1;
            }
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Habit, Periodicity, RecordKind};
    use crate::storage::SqliteStorage;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn record(name: &str, d: u32, kind: RecordKind) -> HistoricalRecord {
        HistoricalRecord {
            habit_name: name.to_string(),
            date: date(d),
            kind,
        }
    }

    #[test]
    fn test_combined_series_per_date_rate() {
        let records = vec![
            record("read", 1, RecordKind::Completed),
            record("clean", 1, RecordKind::Completed),
            record("walk", 1, RecordKind::Missed),
        ];

        let series = StatisticsEngine::combined_series(&records);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date(1));
        assert!((series[0].rate - 0.667).abs() < 0.001);
    }

    #[test]
    fn test_habit_series_uses_total_record_count() {
        let records = vec![
            record("read", 3, RecordKind::Completed),
            record("read", 1, RecordKind::Completed),
            record("read", 2, RecordKind::Missed),
            record("read", 4, RecordKind::Completed),
        ];

        let series = StatisticsEngine::habit_series(&records);

        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3), date(4)]);
        assert_eq!(series[0].rate, 0.25);
        assert_eq!(series[1].rate, 0.0);
        assert_eq!(series[3].rate, 0.25);
    }

    #[test]
    fn test_series_are_sorted_by_date() {
        let records = vec![
            record("a", 9, RecordKind::Missed),
            record("a", 2, RecordKind::Completed),
            record("b", 5, RecordKind::Completed),
        ];

        let series = StatisticsEngine::combined_series(&records);
        assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_series_for_missing_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let engine = StatisticsEngine::new();

        let result = engine.series_for(&storage, "ghost");
        assert!(matches!(result, Err(TrackerError::NotFound(name)) if name == "ghost"));
    }

    #[test]
    fn test_series_for_habit_without_history() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit = Habit::new("read".to_string(), Periodicity::Daily, String::new(), date(1)).unwrap();
        storage.insert(&habit).unwrap();

        let result = StatisticsEngine::new().series_for(&storage, "read");
        assert!(matches!(result, Err(TrackerError::NotFound(_))));
    }

    #[test]
    fn test_series_from_storage() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let mut habit = Habit::new("read".to_string(), Periodicity::Daily, String::new(), date(1)).unwrap();
        habit.complete(date(1));
        habit.complete(date(2));
        habit.complete(date(5)); // decays on the 5th, then completes
        storage.insert(&habit).unwrap();

        let engine = StatisticsEngine::new();
        let series = engine.series_for(&storage, "read").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].date, date(5));
        assert_eq!(series[2].rate, 0.25);

        let combined = engine.series_for_all(&storage).unwrap();
        assert_eq!(combined[2].rate, 0.5);
    }

    #[test]
    fn test_series_for_all_empty() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(StatisticsEngine::new().series_for_all(&storage).unwrap().is_empty());
    }
}
