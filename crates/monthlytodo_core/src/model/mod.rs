//! Domain model for habits, weekly tasks and reminders.
//!
//! # Responsibility
//! - Define the records persisted as whole JSON documents.
//! - Keep per-record invariants (completion stamps, history pruning,
//!   time-of-day parsing) next to the data they protect.
//!
//! # Invariants
//! - Wire field names are camelCase and stable across releases.
//! - Every record is owned by the store; callers only see decoded copies.

pub mod habit;
pub mod patch;
pub mod reminder;
pub mod task;
