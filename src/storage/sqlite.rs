//! SQLite implementation of the habit repository
//!
//! This module provides the concrete SQLite implementation for storing
//! and retrieving habit data. It handles all SQL queries and data conversion.

use std::os::raw::c_int;
use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};

use crate::domain::{format_date, parse_date, Habit, HistoricalRecord, Periodicity};
use crate::storage::{migrations, HabitRepository, StorageError};

/// Columns of a joined habit + dates row, in SELECT order
const HABIT_COLUMNS: &str = "h.name, h.created_date, h.periodicity, h.description,
    h.current_streak, h.longest_streak, h.broken_streak,
    d.completed_dates, d.missed_dates, d.last_update, d.last_decay";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitRepository trait.
pub struct SqliteStorage {
    conn: Connection,
}

/// Raw values of one habit row before date parsing
struct HabitRow {
    name: String,
    created_date: String,
    periodicity: String,
    description: String,
    current_streak: u32,
    longest_streak: u32,
    broken_streak: u32,
    completed_dates: Option<String>,
    missed_dates: Option<String>,
    last_update: Option<String>,
    last_decay: Option<String>,
}

impl HabitRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            created_date: row.get(1)?,
            periodicity: row.get(2)?,
            description: row.get(3)?,
            current_streak: row.get(4)?,
            longest_streak: row.get(5)?,
            broken_streak: row.get(6)?,
            completed_dates: row.get(7)?,
            missed_dates: row.get(8)?,
            last_update: row.get(9)?,
            last_decay: row.get(10)?,
        })
    }

    fn into_habit(self) -> Result<Habit, StorageError> {
        let periodicity = self.periodicity.parse::<Periodicity>().map_err(|_| {
            StorageError::Query(rusqlite::Error::InvalidColumnType(
                2, format!("Invalid periodicity '{}'", self.periodicity), rusqlite::types::Type::Text
            ))
        })?;

        Ok(Habit {
            created_date: SqliteStorage::decode_date(&self.created_date)?,
            periodicity,
            description: self.description,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            broken_streak: self.broken_streak,
            last_update: SqliteStorage::decode_optional_date(self.last_update)?,
            last_decay: SqliteStorage::decode_optional_date(self.last_decay)?,
            completed_dates: SqliteStorage::decode_dates(self.completed_dates.as_deref())?,
            missed_dates: SqliteStorage::decode_dates(self.missed_dates.as_deref())?,
            name: self.name,
        })
    }
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Create a storage instance backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Deleting a habit cascades to its dates
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Encode a date list as a JSON array of DD.MM.YYYY strings
    fn encode_dates(dates: &[NaiveDate]) -> Result<String, StorageError> {
        let formatted: Vec<String> = dates.iter().map(|date| format_date(*date)).collect();
        Ok(serde_json::to_string(&formatted)?)
    }

    /// Decode a JSON date list; a missing or empty value is an empty list
    fn decode_dates(value: Option<&str>) -> Result<Vec<NaiveDate>, StorageError> {
        let value = match value.map(str::trim) {
            None | Some("") => return Ok(Vec::new()),
            Some(value) => value,
        };

        let formatted: Vec<String> = serde_json::from_str(value)?;
        formatted.iter().map(|date| Self::decode_date(date)).collect()
    }

    fn decode_date(value: &str) -> Result<NaiveDate, StorageError> {
        parse_date(value).map_err(|_| StorageError::InvalidDate { value: value.to_string() })
    }

    fn decode_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, StorageError> {
        value.as_deref().map(Self::decode_date).transpose()
    }

    /// Extended result code of a failed statement, if it was a constraint violation
    fn constraint_kind(error: &rusqlite::Error) -> Option<c_int> {
        match error {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                Some(e.extended_code)
            }
            _ => None,
        }
    }

    fn is_unique_violation(error: &rusqlite::Error) -> bool {
        matches!(
            Self::constraint_kind(error),
            Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) | Some(ffi::SQLITE_CONSTRAINT_UNIQUE)
        )
    }

    fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
        Self::constraint_kind(error) == Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
    }

    fn write_streaks(
        conn: &Connection,
        name: &str,
        current_streak: u32,
        longest_streak: u32,
        broken_streak: u32,
    ) -> Result<(), StorageError> {
        let rows_affected = conn.execute(
            "UPDATE habits SET
                current_streak = ?2,
                longest_streak = ?3,
                broken_streak = ?4
             WHERE name = ?1",
            params![name, current_streak, longest_streak, broken_streak],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { name: name.to_string() });
        }

        tracing::debug!(
            "Updated streaks for {}: current={}, longest={}, broken={}",
            name, current_streak, longest_streak, broken_streak
        );
        Ok(())
    }

    fn write_history(
        conn: &Connection,
        name: &str,
        completed_dates: &[NaiveDate],
        missed_dates: &[NaiveDate],
        last_update: Option<NaiveDate>,
        last_decay: Option<NaiveDate>,
    ) -> Result<(), StorageError> {
        let result = conn.execute(
            "INSERT INTO habit_dates (
                habit_name, completed_dates, missed_dates, last_update, last_decay
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (habit_name) DO UPDATE SET
                completed_dates = excluded.completed_dates,
                missed_dates = excluded.missed_dates,
                last_update = excluded.last_update,
                last_decay = excluded.last_decay",
            params![
                name,
                Self::encode_dates(completed_dates)?,
                Self::encode_dates(missed_dates)?,
                last_update.map(format_date),
                last_decay.map(format_date)
            ],
        );

        match result {
            Ok(_) => {}
            // The foreign key rejects dates for a habit that doesn't exist
            Err(e) if Self::is_foreign_key_violation(&e) => {
                return Err(StorageError::HabitNotFound { name: name.to_string() });
            }
            Err(e) => return Err(StorageError::Query(e)),
        }

        tracing::debug!(
            "Updated history for {}: {} completed, {} missed",
            name,
            completed_dates.len(),
            missed_dates.len()
        );
        Ok(())
    }
}

impl HabitRepository for SqliteStorage {
    /// Load every habit joined with its dates, oldest first
    fn load_all(&self) -> Result<Vec<Habit>, StorageError> {
        let sql = format!(
            "SELECT {} FROM habits h LEFT JOIN habit_dates d ON d.habit_name = h.name ORDER BY h.rowid",
            HABIT_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], HabitRow::from_row)?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.into_habit()?);
        }

        tracing::debug!("Loaded {} habits", habits.len());
        Ok(habits)
    }

    fn load_names(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT name FROM habits ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Insert a habit together with its dates row
    fn insert(&self, habit: &Habit) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        let inserted = tx.execute(
            "INSERT INTO habits (
                name, created_date, periodicity, description,
                current_streak, longest_streak, broken_streak
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                habit.name,
                format_date(habit.created_date),
                habit.periodicity.as_str(),
                habit.description,
                habit.current_streak,
                habit.longest_streak,
                habit.broken_streak
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(e) if Self::is_unique_violation(&e) => {
                return Err(StorageError::DuplicateHabit { name: habit.name.clone() });
            }
            Err(e) => return Err(StorageError::Query(e)),
        }

        tx.execute(
            "INSERT INTO habit_dates (
                habit_name, completed_dates, missed_dates, last_update, last_decay
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.name,
                Self::encode_dates(&habit.completed_dates)?,
                Self::encode_dates(&habit.missed_dates)?,
                habit.last_update.map(format_date),
                habit.last_decay.map(format_date)
            ],
        )?;

        tx.commit()?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.periodicity);
        Ok(())
    }

    /// Delete a habit and its dates
    fn delete(&self, name: &str) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM habit_dates WHERE habit_name = ?1", params![name])?;
        let rows_affected = tx.execute("DELETE FROM habits WHERE name = ?1", params![name])?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { name: name.to_string() });
        }

        tx.commit()?;

        tracing::debug!("Deleted habit: {}", name);
        Ok(())
    }

    fn update_streaks(
        &self,
        name: &str,
        current_streak: u32,
        longest_streak: u32,
        broken_streak: u32,
    ) -> Result<(), StorageError> {
        Self::write_streaks(&self.conn, name, current_streak, longest_streak, broken_streak)
    }

    fn update_history(
        &self,
        name: &str,
        completed_dates: &[NaiveDate],
        missed_dates: &[NaiveDate],
        last_update: Option<NaiveDate>,
        last_decay: Option<NaiveDate>,
    ) -> Result<(), StorageError> {
        Self::write_history(&self.conn, name, completed_dates, missed_dates, last_update, last_decay)
    }

    /// Store streaks and history of a habit in one transaction
    fn save_progress(&self, habit: &Habit) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        Self::write_streaks(
            &tx,
            &habit.name,
            habit.current_streak,
            habit.longest_streak,
            habit.broken_streak,
        )?;
        Self::write_history(
            &tx,
            &habit.name,
            &habit.completed_dates,
            &habit.missed_dates,
            habit.last_update,
            habit.last_decay,
        )?;

        tx.commit()?;
        Ok(())
    }

    fn load_records(&self, name: &str) -> Result<Vec<HistoricalRecord>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT completed_dates, missed_dates FROM habit_dates WHERE habit_name = ?1",
                params![name],
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?)),
            )
            .optional()?;

        match row {
            None => Ok(Vec::new()),
            Some((completed, missed)) => Ok(HistoricalRecord::from_history(
                name,
                &Self::decode_dates(completed.as_deref())?,
                &Self::decode_dates(missed.as_deref())?,
            )),
        }
    }

    fn load_all_records(&self) -> Result<Vec<HistoricalRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT d.habit_name, d.completed_dates, d.missed_dates
             FROM habit_dates d JOIN habits h ON h.name = d.habit_name
             ORDER BY h.rowid",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (name, completed, missed) = row?;
            records.extend(HistoricalRecord::from_history(
                &name,
                &Self::decode_dates(completed.as_deref())?,
                &Self::decode_dates(missed.as_deref())?,
            ));
        }

        Ok(records)
    }
}
