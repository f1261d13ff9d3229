//! Injected time source and local-calendar date helpers.
//!
//! # Responsibility
//! - Give services a replaceable notion of "today" and "now".
//! - Format and parse canonical `YYYY-MM-DD` date keys.
//! - Derive record ids from the current time.
//!
//! # Invariants
//! - Dates are local-calendar dates; no timezone conversion is applied.
//! - Generated ids never collide with an id reported as taken.

use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;
use uuid::Uuid;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Time source used by services for date stamps and id generation.
pub trait Clock {
    /// Current local-calendar date.
    fn today(&self) -> NaiveDate;
    /// Current wall-clock time in Unix epoch milliseconds.
    fn now_millis(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }
}

/// Manually driven clock for deterministic callers and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    now_millis: Cell<i64>,
}

impl FixedClock {
    pub fn new(today: NaiveDate, now_millis: i64) -> Self {
        Self {
            today: Cell::new(today),
            now_millis: Cell::new(now_millis),
        }
    }

    /// Moves the calendar date without touching the millisecond counter.
    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Advances the millisecond counter.
    pub fn advance_millis(&self, millis: i64) {
        self.now_millis.set(self.now_millis.get() + millis);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn now_millis(&self) -> i64 {
        self.now_millis.get()
    }
}

/// Formats a date as its canonical `YYYY-MM-DD` storage key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` storage key.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).ok()
}

/// Returns the date `days` calendar days before `date`.
///
/// Saturates at the earliest representable date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Builds a `<prefix><millis>` id, falling back to a random suffix when the
/// plain form is already taken (two creations within one millisecond).
pub fn generate_id(prefix: &str, now_millis: i64, is_taken: impl Fn(&str) -> bool) -> String {
    let candidate = format!("{prefix}{now_millis}");
    if !is_taken(candidate.as_str()) {
        return candidate;
    }

    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let fallback = format!("{candidate}_{}", &suffix[..8]);
        if !is_taken(fallback.as_str()) {
            return fallback;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{date_key, days_before, generate_id, parse_date_key, Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn date_key_zero_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_key(date), "2024-03-07");
        assert_eq!(parse_date_key("2024-03-07"), Some(date));
        assert_eq!(parse_date_key("2024-3-7x"), None);
    }

    #[test]
    fn days_before_crosses_month_boundary() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            days_before(date, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn generate_id_avoids_taken_ids() {
        assert_eq!(generate_id("habit_", 42, |_| false), "habit_42");

        let id = generate_id("habit_", 42, |candidate| candidate == "habit_42");
        assert!(id.starts_with("habit_42_"));
        assert_eq!(id.len(), "habit_42_".len() + 8);
    }

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 1_000);
        clock.advance_millis(5);
        clock.set_today(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(clock.now_millis(), 1_005);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
