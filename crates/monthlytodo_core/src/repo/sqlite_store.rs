//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist one JSON document per storage key in the `documents` table.
//!
//! # Invariants
//! - Only connections with the current schema version are accepted.
//! - `remove_many` clears all keys in one transaction.

use crate::db::migrations::{current_user_version, latest_version};
use crate::repo::document_store::{DocumentStore, StorageKey, StoreError, StoreResult};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

/// Document store over a migrated SQLite connection.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Wraps a connection returned by `db::open_db`/`db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn get_raw(&self, key: StorageKey) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: StorageKey, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO documents (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key.as_str(), value],
        )?;
        debug!(
            "event=document_write module=store status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove_many(&self, keys: &[StorageKey]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for key in keys {
            if let Err(err) = tx.execute("DELETE FROM documents WHERE key = ?1;", [key.as_str()]) {
                error!(
                    "event=document_remove module=store status=error key={} error={}",
                    key, err
                );
                return Err(err.into());
            }
        }
        tx.commit()?;
        debug!(
            "event=document_remove module=store status=ok count={}",
            keys.len()
        );
        Ok(())
    }
}
