//! Core domain logic for MonthlyTodo: habits, a four-week task plan and
//! daily reminders, persisted as JSON documents.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod report;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging};
pub use model::habit::{default_habits, Habit, HabitHistory, HabitId};
pub use model::reminder::{
    default_reminders, Reminder, ReminderDraft, ReminderId, ReminderPatch, ReminderSettings,
    ReminderTime, ReminderTimeError,
};
pub use model::task::{default_weeks, NewTask, Task, TaskId, TaskPatch, Week};
pub use notify::{NotificationError, NotificationPayload, NotificationScheduler, NullScheduler};
pub use repo::document_store::{DocumentStore, StorageKey, StoreError, StoreResult};
pub use repo::memory_store::MemoryDocumentStore;
pub use repo::sqlite_store::SqliteDocumentStore;
pub use report::progress::{calculate_progress, week_progress, Progress};
pub use service::habit_service::{HabitService, HabitSnapshot};
pub use service::reminder_service::ReminderService;
pub use service::reset_service::ResetService;
pub use service::task_service::{TaskService, TaskServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
