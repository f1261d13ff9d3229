//! Notification collaborator port.
//!
//! # Responsibility
//! - Describe the host notification surface core depends on.
//! - Keep platform trigger/channel details outside core.
//!
//! # Invariants
//! - Core passes only hour/minute and a text payload to the host.
//! - Handles returned by the host are opaque strings.

use crate::model::reminder::ReminderTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title shown on every reminder notification.
pub const REMINDER_NOTIFICATION_TITLE: &str = "Habit Reminder";

/// Host-side scheduling failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// User has not granted notification permission.
    PermissionDenied,
    /// Host has no notification service at all.
    Unavailable,
    /// Platform call failed.
    Platform(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::Unavailable => write!(f, "notification service unavailable"),
            Self::Platform(message) => write!(f, "notification platform error: {message}"),
        }
    }
}

impl Error for NotificationError {}

/// Content of one scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Reminder the notification belongs to, echoed back by the host on tap.
    pub reminder_id: String,
}

/// Host notification service.
pub trait NotificationScheduler {
    /// Asks for (or confirms) permission to post notifications.
    fn request_permission(&self) -> bool;

    /// Registers a trigger repeating every day at `time`.
    fn schedule_daily(
        &self,
        time: ReminderTime,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError>;

    /// Cancels a previously scheduled trigger.
    fn cancel(&self, handle: &str) -> Result<(), NotificationError>;
}

impl<N: NotificationScheduler + ?Sized> NotificationScheduler for &N {
    fn request_permission(&self) -> bool {
        (**self).request_permission()
    }

    fn schedule_daily(
        &self,
        time: ReminderTime,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        (**self).schedule_daily(time, payload)
    }

    fn cancel(&self, handle: &str) -> Result<(), NotificationError> {
        (**self).cancel(handle)
    }
}

/// Scheduler for hosts without a notification service (CLI, headless
/// embedders, FFI callers that schedule on their side).
///
/// Permission is never granted, nothing is scheduled, and cancels report
/// `Unavailable` so a skipped cancel is visible in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScheduler;

impl NotificationScheduler for NullScheduler {
    fn request_permission(&self) -> bool {
        false
    }

    fn schedule_daily(
        &self,
        _time: ReminderTime,
        _payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        Err(NotificationError::Unavailable)
    }

    fn cancel(&self, _handle: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Unavailable)
    }
}
