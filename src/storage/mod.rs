//! Storage layer for persisting habit data
//!
//! This module handles all database operations using SQLite. It provides
//! a clean interface for storing and retrieving habits and their date history.

pub mod sqlite;
pub mod migrations;
pub mod demo;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Habit, HistoricalRecord};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Habit not found: {name}")]
    HabitNotFound { name: String },

    #[error("A habit named '{name}' already exists")]
    DuplicateHabit { name: String },

    #[error("Invalid stored date '{value}'")]
    InvalidDate { value: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// The registry and the statistics engine only talk to storage through this
/// trait, so tests can swap the on-disk database for an in-memory one.
pub trait HabitRepository {
    /// Load every habit with its history, in insertion order
    fn load_all(&self) -> Result<Vec<Habit>, StorageError>;

    /// Load the names of all habits, in insertion order
    fn load_names(&self) -> Result<Vec<String>, StorageError>;

    /// Insert a new habit and its (possibly empty) history
    fn insert(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit and its history
    fn delete(&self, name: &str) -> Result<(), StorageError>;

    /// Store the streak counters of a habit
    fn update_streaks(
        &self,
        name: &str,
        current_streak: u32,
        longest_streak: u32,
        broken_streak: u32,
    ) -> Result<(), StorageError>;

    /// Store the date history of a habit
    fn update_history(
        &self,
        name: &str,
        completed_dates: &[NaiveDate],
        missed_dates: &[NaiveDate],
        last_update: Option<NaiveDate>,
        last_decay: Option<NaiveDate>,
    ) -> Result<(), StorageError>;

    /// Load the historical records of one habit
    fn load_records(&self, name: &str) -> Result<Vec<HistoricalRecord>, StorageError>;

    /// Load the historical records of all habits
    fn load_all_records(&self) -> Result<Vec<HistoricalRecord>, StorageError>;

    /// Persist everything the state machine may have changed on `habit`
    ///
    /// Either both writes land or neither does; `SqliteStorage` overrides
    /// this to run them in one transaction.
    fn save_progress(&self, habit: &Habit) -> Result<(), StorageError> {
        self.update_streaks(
            &habit.name,
            habit.current_streak,
            habit.longest_streak,
            habit.broken_streak,
        )?;
        self.update_history(
            &habit.name,
            &habit.completed_dates,
            &habit.missed_dates,
            habit.last_update,
            habit.last_decay,
        )
    }
}
