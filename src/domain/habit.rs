//! Habit entity and the streak state machine
//!
//! This module defines the core Habit struct that represents a user's habit,
//! along with the two transitions that change its streaks: passive decay
//! (`evaluate`) and the user's check-off (`complete`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Periodicity};

/// Maximum length of a habit name
const MAX_NAME_LEN: usize = 100;

/// Maximum length of a habit description
const MAX_DESCRIPTION_LEN: usize = 500;

/// A habit represents something the user wants to do regularly
///
/// The name is the habit's identity. Streak counters and the date history
/// are only ever changed through `evaluate` and `complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Display name and unique key (e.g., "read", "no phone")
    pub name: String,
    /// Day the habit was created
    pub created_date: NaiveDate,
    /// How often this habit should be performed
    pub periodicity: Periodicity,
    /// Short description of the task
    pub description: String,
    /// Periods completed in a row
    pub current_streak: u32,
    /// Best streak ever achieved
    pub longest_streak: u32,
    /// Periods missed since the last completion
    pub broken_streak: u32,
    /// Day of the most recent completion (None if never completed)
    pub last_update: Option<NaiveDate>,
    /// Day decay was last applied; keeps a missed interval from being counted twice
    pub last_decay: Option<NaiveDate>,
    /// Every completion day, oldest first
    pub completed_dates: Vec<NaiveDate>,
    /// Every day a missed period was detected, oldest first
    pub missed_dates: Vec<NaiveDate>,
}

/// Result of checking a habit off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOffOutcome {
    /// The period was open and is now satisfied
    Completed { current_streak: u32, longest_streak: u32 },
    /// The current period already had a completion; nothing changed
    AlreadyCompleted,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Counters start at zero and the habit has never been completed.
    pub fn new(
        name: String,
        periodicity: Periodicity,
        description: String,
        created_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;

        Ok(Self {
            name,
            created_date,
            periodicity,
            description: description.trim().to_string(),
            current_streak: 0,
            longest_streak: 0,
            broken_streak: 0,
            last_update: None,
            last_decay: None,
            completed_dates: Vec::new(),
            missed_dates: Vec::new(),
        })
    }

    /// Whether the habit has never been checked off
    pub fn is_new(&self) -> bool {
        self.last_update.is_none()
    }

    /// Date the next missed interval is measured from
    ///
    /// The last completion (or creation day), moved forward to the last day
    /// decay was applied.
    fn decay_reference(&self) -> NaiveDate {
        let base = self.last_update.unwrap_or(self.created_date);
        match self.last_decay {
            Some(decayed) if decayed > base => decayed,
            _ => base,
        }
    }

    /// Apply decay if a full period went by without a completion
    ///
    /// Returns `true` when the streak was broken by this call. Calling it
    /// again before another full period has elapsed is a no-op.
    pub fn evaluate(&mut self, now: NaiveDate) -> bool {
        let reference = self.decay_reference();
        if !self.periodicity.has_elapsed(reference, now) {
            return false;
        }

        self.current_streak = 0;
        self.broken_streak += 1;
        self.missed_dates.push(now);
        self.last_decay = Some(now);

        tracing::debug!(
            "Habit '{}' missed a {} period (broken streak: {})",
            self.name,
            self.periodicity,
            self.broken_streak
        );
        true
    }

    /// Check if the current period already has a recorded completion
    pub fn habit_completion_check(&self, now: NaiveDate) -> bool {
        match self.last_update {
            None => false,
            Some(last) => self.periodicity.is_satisfied(last, now),
        }
    }

    /// Check the habit off for the period containing `now`
    ///
    /// Decay is applied first so a long gap is recorded as a miss before the
    /// new completion starts a fresh streak.
    pub fn complete(&mut self, now: NaiveDate) -> CheckOffOutcome {
        self.evaluate(now);

        if self.habit_completion_check(now) {
            return CheckOffOutcome::AlreadyCompleted;
        }

        self.current_streak += 1;
        self.broken_streak = 0;
        self.last_update = Some(now);
        self.completed_dates.push(now);
        self.longest_streak = self.longest_streak.max(self.current_streak);

        CheckOffOutcome::Completed {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
        }
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(
                format!("Habit name cannot be longer than {} characters", MAX_NAME_LEN)
            ));
        }

        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation {
                message: format!("Description cannot be longer than {} characters", MAX_DESCRIPTION_LEN)
            });
        }
        Ok(())
    }
}
