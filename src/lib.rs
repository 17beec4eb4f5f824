//! Public library interface for the habit tracker
//!
//! This module exports the registry, the statistics engine, the storage
//! layer and the interactive menu, plus the application type that wires
//! them together.

use std::path::PathBuf;

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod registry;
mod cli;

// Re-export public modules and types
pub use domain::*;
pub use storage::{demo::demo_habits, HabitRepository, SqliteStorage, StorageError};
pub use analytics::{chart::{ChartRenderer, TextChart}, CompletionPoint, StatisticsEngine};
pub use registry::HabitRegistry;
pub use cli::{greeting, MenuCommand, MenuSession, MENU_TEXT};

/// Errors that can occur while tracking habits
///
/// Every variant is recoverable: the menu reports it and keeps running.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("A habit named '{0}' already exists")]
    DuplicateHabit(String),

    #[error("Habit '{0}' does not exist")]
    NotFound(String),

    #[error("Invalid periodicity '{0}'. Valid options: daily, weekly, monthly")]
    InvalidPeriodicity(String),

    #[error("{0}")]
    Domain(domain::DomainError),

    #[error("Storage failure: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<domain::DomainError> for TrackerError {
    fn from(error: domain::DomainError) -> Self {
        match error {
            domain::DomainError::InvalidPeriodicity(value) => TrackerError::InvalidPeriodicity(value),
            other => TrackerError::Domain(other),
        }
    }
}

/// Main habit tracker application
///
/// Owns the registry (and through it the database connection) and the
/// statistics engine for the lifetime of one session.
pub struct HabitTrackerApp {
    registry: HabitRegistry<SqliteStorage>,
    statistics: StatisticsEngine,
}

impl HabitTrackerApp {
    /// Open the database at `db_path` and load every habit
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Initializing habit tracker with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        let registry = HabitRegistry::load(storage)?;

        Ok(Self {
            registry,
            statistics: StatisticsEngine::new(),
        })
    }

    /// Add the demo habits whose names are not taken yet
    pub fn seed_demo_data(&mut self) -> Result<usize, TrackerError> {
        let added = self.registry.import(demo_habits())?;
        tracing::info!("Seeded {} demo habits", added);
        Ok(added)
    }

    /// Run the interactive menu on stdin/stdout until the user exits
    ///
    /// Charts for menu items 13 and 14 are drawn with `chart`.
    pub async fn run<C: ChartRenderer + 'static>(self, chart: C) -> Result<(), TrackerError> {
        tracing::info!("Starting menu session with {} habits", self.registry.len());

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        let mut session = MenuSession::new(self.registry, stdin, stdout)
            .with_statistics(self.statistics)
            .with_chart(Box::new(chart));
        session.run().await
    }

    /// Get a reference to the registry (useful for testing)
    pub fn registry(&self) -> &HabitRegistry<SqliteStorage> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HabitRegistry<SqliteStorage> {
        &mut self.registry
    }

    /// Get a reference to the statistics engine (useful for testing)
    pub fn statistics(&self) -> &StatisticsEngine {
        &self.statistics
    }
}
