//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate whole-document read-modify-write cycles into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Reads never fail: unreadable documents fall back to safe defaults.
//! - Unknown ids and out-of-range indexes are no-ops returning the
//!   unchanged collection (the task toggle is the one documented exception).

pub mod habit_service;
pub mod reminder_service;
pub mod reset_service;
pub mod task_service;

use crate::repo::document_store::{DocumentStore, StorageKey};
use log::{info, warn};
use serde::de::DeserializeOwned;

/// Outcome of reading one document with fallback semantics.
pub(crate) enum Loaded<T> {
    Stored(T),
    Missing,
    Unreadable,
}

pub(crate) fn load_document<S, T>(store: &S, key: StorageKey) -> Loaded<T>
where
    S: DocumentStore,
    T: DeserializeOwned,
{
    match store.get::<T>(key) {
        Ok(Some(value)) => Loaded::Stored(value),
        Ok(None) => Loaded::Missing,
        Err(err) => {
            warn!(
                "event=document_read module=store status=fallback key={} error={}",
                key, err
            );
            Loaded::Unreadable
        }
    }
}

/// Reads a document, substituting `T::default()` when missing or unreadable.
pub(crate) fn load_or_default<S, T>(store: &S, key: StorageKey) -> T
where
    S: DocumentStore,
    T: DeserializeOwned + Default,
{
    match load_document(store, key) {
        Loaded::Stored(value) => value,
        Loaded::Missing | Loaded::Unreadable => T::default(),
    }
}

/// Reads a document, seeding and persisting `seed()` on first use.
///
/// Unreadable documents return the seed without overwriting storage; a
/// failed seed write is logged and the seed is still returned.
pub(crate) fn load_or_seed<S, T>(store: &S, key: StorageKey, seed: impl FnOnce() -> T) -> T
where
    S: DocumentStore,
    T: DeserializeOwned + serde::Serialize,
{
    match load_document(store, key) {
        Loaded::Stored(value) => value,
        Loaded::Unreadable => seed(),
        Loaded::Missing => {
            let value = seed();
            match store.set(key, &value) {
                Ok(()) => info!("event=document_seed module=store status=ok key={key}"),
                Err(err) => warn!(
                    "event=document_seed module=store status=error key={} error={}",
                    key, err
                ),
            }
            value
        }
    }
}
