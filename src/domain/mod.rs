//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (Habit, HistoricalRecord) and the
//! period rules that drive the streak state machine. These types represent
//! the fundamental concepts in our habit tracking system.

pub mod habit;
pub mod entry;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use entry::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid periodicity '{0}'. Valid options: daily, weekly, monthly")]
    InvalidPeriodicity(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
