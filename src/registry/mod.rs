//! In-memory habit registry
//!
//! The registry holds every habit loaded at session start and keeps it in
//! sync with the repository. Mutations update the affected habit in memory
//! and persist only that habit; the registry never reloads wholesale.

use chrono::NaiveDate;

use crate::domain::{CheckOffOutcome, Habit, Periodicity, StreakLeader};
use crate::storage::{HabitRepository, StorageError};
use crate::TrackerError;

/// Collection of habits backed by a repository
pub struct HabitRegistry<S: HabitRepository> {
    storage: S,
    habits: Vec<Habit>,
}

impl<S: HabitRepository> HabitRegistry<S> {
    /// Load every habit from `storage`
    pub fn load(storage: S) -> Result<Self, TrackerError> {
        let habits = storage.load_all()?;
        tracing::info!("Loaded {} habits into the registry", habits.len());
        Ok(Self { storage, habits })
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Names of all habits, in registry order
    pub fn names(&self) -> Vec<&str> {
        self.habits.iter().map(|habit| habit.name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.habits.iter().position(|habit| habit.name == name)
    }

    /// Look up one habit by name
    pub fn get(&self, name: &str) -> Result<&Habit, TrackerError> {
        self.habits
            .iter()
            .find(|habit| habit.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }

    /// Create a new habit and persist it
    pub fn add(
        &mut self,
        name: &str,
        periodicity: Periodicity,
        description: &str,
        today: NaiveDate,
    ) -> Result<&Habit, TrackerError> {
        let habit = Habit::new(name.to_string(), periodicity, description.to_string(), today)?;

        if self.position(&habit.name).is_some() {
            return Err(TrackerError::DuplicateHabit(habit.name));
        }

        match self.storage.insert(&habit) {
            Ok(()) => {}
            Err(StorageError::DuplicateHabit { name }) => return Err(TrackerError::DuplicateHabit(name)),
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Added {} habit '{}'", habit.periodicity, habit.name);
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Delete a habit and its history
    pub fn remove(&mut self, name: &str) -> Result<Habit, TrackerError> {
        let index = self
            .position(name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;

        match self.storage.delete(name) {
            Ok(()) => {}
            Err(StorageError::HabitNotFound { name }) => return Err(TrackerError::NotFound(name)),
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Removed habit '{}'", name);
        Ok(self.habits.remove(index))
    }

    /// Check a habit off for the period containing `today`
    ///
    /// Any decay found along the way is persisted even when the period
    /// turns out to be already completed.
    pub fn complete(&mut self, name: &str, today: NaiveDate) -> Result<CheckOffOutcome, TrackerError> {
        let index = self
            .position(name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))?;

        // Work on a copy so a failed write leaves memory matching the database
        let mut habit = self.habits[index].clone();
        let decayed = habit.evaluate(today);
        let outcome = habit.complete(today);

        if decayed || matches!(outcome, CheckOffOutcome::Completed { .. }) {
            self.storage.save_progress(&habit)?;
        }
        self.habits[index] = habit;

        tracing::debug!("Check-off of '{}' on {}: {:?}", name, today, outcome);
        Ok(outcome)
    }

    /// Apply decay to every habit and persist the ones that changed
    ///
    /// Returns the number of habits whose streak was broken. Call this
    /// before reporting streaks.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<usize, TrackerError> {
        let mut decayed = 0;

        for stored in self.habits.iter_mut() {
            let mut habit = stored.clone();
            if habit.evaluate(today) {
                self.storage.save_progress(&habit)?;
                *stored = habit;
                decayed += 1;
            }
        }

        if decayed > 0 {
            tracing::info!("{} habits missed their period as of {}", decayed, today);
        }
        Ok(decayed)
    }

    /// Habit with the longest streak ever
    pub fn longest_streak_overall(&self) -> StreakLeader {
        StreakLeader::find(&self.habits, |habit| habit.longest_streak)
    }

    /// Habit with the most missed periods in a row, the hardest one to keep
    pub fn broken_streak_overall(&self) -> StreakLeader {
        StreakLeader::find(&self.habits, |habit| habit.broken_streak)
    }

    pub fn longest_streak_of(&self, name: &str) -> Result<u32, TrackerError> {
        Ok(self.get(name)?.longest_streak)
    }

    pub fn broken_streak_of(&self, name: &str) -> Result<u32, TrackerError> {
        Ok(self.get(name)?.broken_streak)
    }

    /// Longest streak of every habit, in registry order
    pub fn longest_streaks(&self) -> Vec<(&str, u32)> {
        self.habits
            .iter()
            .map(|habit| (habit.name.as_str(), habit.longest_streak))
            .collect()
    }

    /// Broken streak of every habit, in registry order
    pub fn broken_streaks(&self) -> Vec<(&str, u32)> {
        self.habits
            .iter()
            .map(|habit| (habit.name.as_str(), habit.broken_streak))
            .collect()
    }

    /// Habits with the given periodicity, in registry order
    pub fn by_periodicity(&self, periodicity: &str) -> Result<Vec<&Habit>, TrackerError> {
        let periodicity: Periodicity = periodicity.parse()?;
        Ok(self
            .habits
            .iter()
            .filter(|habit| habit.periodicity == periodicity)
            .collect())
    }

    /// Every habit, in registry order
    pub fn all_summaries(&self) -> &[Habit] {
        &self.habits
    }

    /// Insert the given habits, skipping names that already exist
    pub fn import(&mut self, habits: Vec<Habit>) -> Result<usize, TrackerError> {
        let mut added = 0;

        for habit in habits {
            if self.position(&habit.name).is_some() {
                tracing::debug!("Skipping import of existing habit '{}'", habit.name);
                continue;
            }
            self.storage.insert(&habit)?;
            self.habits.push(habit);
            added += 1;
        }

        Ok(added)
    }
}
