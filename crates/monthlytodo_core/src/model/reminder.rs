//! Reminder records, time-of-day values and reminder mode settings.
//!
//! # Responsibility
//! - Define user reminders and the default/custom mode flag.
//! - Parse and format the `HH:MM` trigger time.
//!
//! # Invariants
//! - `ReminderTime` always holds `hour < 24` and `minute < 60`.
//! - `notification_id` is an opaque host handle; core never interprets it.

use crate::model::patch::{merge_field, Patch};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable reminder identifier (`reminder_<millis>` or `default_*`).
pub type ReminderId = String;

pub const DEFAULT_MORNING_REMINDER_ID: &str = "default_6am";
pub const DEFAULT_EVENING_REMINDER_ID: &str = "default_10pm";

const DEFAULT_MORNING_MESSAGE: &str =
    "You haven't done your tasks today. Wake up and start your day.";
const DEFAULT_EVENING_MESSAGE: &str = "Have you done all of your tasks today?";

/// Error for malformed `HH:MM` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderTimeError {
    /// Input is not two colon-separated numeric parts.
    Malformed(String),
    /// Parts parsed but fall outside a 24h clock.
    OutOfRange { hour: u32, minute: u32 },
}

impl Display for ReminderTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "reminder time must be HH:MM, got `{value}`"),
            Self::OutOfRange { hour, minute } => {
                write!(f, "reminder time {hour}:{minute} is outside 00:00-23:59")
            }
        }
    }
}

impl Error for ReminderTimeError {}

/// Daily trigger time on a 24h clock, stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ReminderTimeError> {
        if hour > 23 || minute > 59 {
            return Err(ReminderTimeError::OutOfRange { hour, minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ReminderTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ReminderTimeError::Malformed(value.to_string());
        let (hour, minute) = value.trim().split_once(':').ok_or_else(malformed)?;
        let hour = parse_clock_part(hour).ok_or_else(malformed)?;
        let minute = parse_clock_part(minute).ok_or_else(malformed)?;
        Self::new(hour, minute)
    }
}

fn parse_clock_part(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl Display for ReminderTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ReminderTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub message: String,
    /// Date the reminder was set for; the trigger itself repeats daily.
    pub date: NaiveDate,
    pub time: ReminderTime,
    /// Host scheduler handle; absent when scheduling failed or inactive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_alarm: Option<bool>,
}

/// Reminder fields supplied by a caller before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub message: String,
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub notification_id: Option<String>,
    pub is_active: bool,
    pub is_alarm: Option<bool>,
}

impl ReminderDraft {
    /// Active draft without a notification handle.
    pub fn new(message: impl Into<String>, date: NaiveDate, time: ReminderTime) -> Self {
        Self {
            message: message.into(),
            date,
            time,
            notification_id: None,
            is_active: true,
            is_alarm: None,
        }
    }

    pub fn into_reminder(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            message: self.message,
            date: self.date,
            time: self.time,
            notification_id: self.notification_id,
            is_active: self.is_active,
            is_alarm: self.is_alarm,
        }
    }

    /// Patch that overwrites the user-editable fields of an existing reminder.
    pub(crate) fn into_patch(self) -> ReminderPatch {
        ReminderPatch {
            message: Some(self.message),
            date: Some(self.date),
            time: Some(self.time),
            notification_id: Some(self.notification_id),
            is_active: Some(self.is_active),
            is_alarm: None,
        }
    }
}

/// Partial reminder update; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub message: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<ReminderTime>,
    pub notification_id: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_alarm: Option<Option<bool>>,
}

impl Patch<Reminder> for ReminderPatch {
    fn apply_to(self, target: &mut Reminder) {
        merge_field(&mut target.message, self.message);
        merge_field(&mut target.date, self.date);
        merge_field(&mut target.time, self.time);
        merge_field(&mut target.notification_id, self.notification_id);
        merge_field(&mut target.is_active, self.is_active);
        merge_field(&mut target.is_alarm, self.is_alarm);
    }

    fn is_empty(&self) -> bool {
        self.message.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.notification_id.is_none()
            && self.is_active.is_none()
            && self.is_alarm.is_none()
    }
}

/// Reminder mode flag plus the user's custom reminder set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub use_default: bool,
    #[serde(default)]
    pub custom_reminders: Vec<Reminder>,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            use_default: true,
            custom_reminders: Vec::new(),
        }
    }
}

/// Builds the two built-in reminders (06:00 and 22:00) dated `today`.
///
/// Nothing is persisted here.
pub fn default_reminders(today: NaiveDate) -> Vec<Reminder> {
    vec![
        Reminder {
            id: DEFAULT_MORNING_REMINDER_ID.to_string(),
            message: DEFAULT_MORNING_MESSAGE.to_string(),
            date: today,
            time: ReminderTime { hour: 6, minute: 0 },
            notification_id: None,
            is_active: true,
            is_alarm: None,
        },
        Reminder {
            id: DEFAULT_EVENING_REMINDER_ID.to_string(),
            message: DEFAULT_EVENING_MESSAGE.to_string(),
            date: today,
            time: ReminderTime {
                hour: 22,
                minute: 0,
            },
            notification_id: None,
            is_active: true,
            is_alarm: None,
        },
    ]
}
