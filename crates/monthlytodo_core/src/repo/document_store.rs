//! Document store contract and storage keys.
//!
//! # Responsibility
//! - Define the whole-document get/set/remove-many persistence boundary.
//! - Provide typed JSON helpers on top of raw string documents.
//!
//! # Invariants
//! - Documents are read and written wholesale; there is no partial access.
//! - Typed reads never mask corrupt JSON; they return `Deserialize` errors
//!   and leave fallback policy to services.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Named buckets persisted by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageKey {
    Habits,
    HabitHistory,
    Weeks,
    /// Legacy bucket; never written, only cleared on reset.
    TaskProgress,
    Reminders,
    ReminderSettings,
}

impl StorageKey {
    /// Every key, in reset order.
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Habits,
        StorageKey::HabitHistory,
        StorageKey::Weeks,
        StorageKey::TaskProgress,
        StorageKey::Reminders,
        StorageKey::ReminderSettings,
    ];

    /// Persisted key name. Kept identical to earlier app releases.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Habits => "monthly_todo_habits",
            Self::HabitHistory => "monthly_todo_habit_history",
            Self::Weeks => "monthly_todo_weeks",
            Self::TaskProgress => "monthly_todo_task_progress",
            Self::Reminders => "monthly_todo_reminders",
            Self::ReminderSettings => "monthly_todo_reminder_settings",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for document persistence and decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection schema does not match what this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    Serialize {
        key: StorageKey,
        source: serde_json::Error,
    },
    Deserialize {
        key: StorageKey,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::Serialize { key, source } => {
                write!(f, "failed to encode document `{key}`: {source}")
            }
            Self::Deserialize { key, source } => {
                write!(f, "corrupt document `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::Serialize { source, .. } | Self::Deserialize { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence of whole JSON documents.
///
/// Implementations only move strings; typed access goes through
/// [`DocumentStore::get`] and [`DocumentStore::set`].
pub trait DocumentStore {
    /// Returns the raw document for `key`, or `None` when never written.
    fn get_raw(&self, key: StorageKey) -> StoreResult<Option<String>>;

    /// Replaces the document for `key`.
    fn set_raw(&self, key: StorageKey, value: &str) -> StoreResult<()>;

    /// Removes every listed key. Missing keys are ignored.
    fn remove_many(&self, keys: &[StorageKey]) -> StoreResult<()>;

    /// Reads and decodes the document for `key`.
    fn get<T: DeserializeOwned>(&self, key: StorageKey) -> StoreResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Deserialize { key, source }),
            None => Ok(None),
        }
    }

    /// Encodes and writes `value` as the document for `key`.
    fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> StoreResult<()>
    where
        Self: Sized,
    {
        let raw =
            serde_json::to_string(value).map_err(|source| StoreError::Serialize { key, source })?;
        self.set_raw(key, &raw)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn get_raw(&self, key: StorageKey) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: StorageKey, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove_many(&self, keys: &[StorageKey]) -> StoreResult<()> {
        (**self).remove_many(keys)
    }
}
