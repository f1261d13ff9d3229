//! Habit and per-day completion history.
//!
//! # Responsibility
//! - Define the habit record and the date-keyed completion history.
//! - Own history mutation rules (toggle, cascade delete, pruning).
//!
//! # Invariants
//! - A date entry never maps to an empty habit set; empty days are pruned.
//! - History keys serialize as canonical `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable habit identifier (`habit_<n>` for seeded and generated habits).
pub type HabitId = String;

/// Completion flags for one calendar day, keyed by habit id.
pub type DayCompletions = BTreeMap<HabitId, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub label: String,
}

impl Habit {
    pub fn new(id: impl Into<HabitId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Habits seeded on first launch.
pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit::new("habit_1", "Morning routine"),
        Habit::new("habit_2", "Read 30 minutes"),
        Habit::new("habit_3", "Exercise"),
        Habit::new("habit_4", "Learn something new"),
    ]
}

/// Full completion history: date -> habit id -> completed.
///
/// Entries are kept indefinitely; the only removal path is habit deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitHistory(BTreeMap<NaiveDate, DayCompletions>);

impl HabitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dates with at least one recorded habit flag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded flags for one date.
    pub fn day(&self, date: NaiveDate) -> Option<&DayCompletions> {
        self.0.get(&date)
    }

    /// Returns whether `habit_id` is marked complete on `date`.
    ///
    /// Absent entries read as not completed.
    pub fn is_completed(&self, date: NaiveDate, habit_id: &str) -> bool {
        self.0
            .get(&date)
            .and_then(|day| day.get(habit_id))
            .copied()
            .unwrap_or(false)
    }

    /// Number of habits marked complete on `date`.
    pub fn completed_count(&self, date: NaiveDate) -> usize {
        self.0
            .get(&date)
            .map_or(0, |day| day.values().filter(|done| **done).count())
    }

    /// Flips the flag at `(date, habit_id)` and returns the new value.
    ///
    /// An absent flag is treated as `false`, so the first toggle marks the
    /// habit complete.
    pub fn toggle(&mut self, date: NaiveDate, habit_id: &str) -> bool {
        let day = self.0.entry(date).or_default();
        let flag = day.entry(habit_id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Sets the flag at `(date, habit_id)` explicitly.
    pub fn set_completed(&mut self, date: NaiveDate, habit_id: &str, completed: bool) {
        self.0
            .entry(date)
            .or_default()
            .insert(habit_id.to_string(), completed);
    }

    /// Removes `habit_id` from every date and prunes dates left empty.
    ///
    /// Returns whether any entry changed.
    pub fn remove_habit(&mut self, habit_id: &str) -> bool {
        let mut changed = false;
        self.0.retain(|_, day| {
            if day.remove(habit_id).is_some() {
                changed = true;
            }
            !day.is_empty()
        });
        changed
    }

    /// Iterates dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayCompletions)> {
        self.0.iter()
    }
}
