//! Habit use-case service.
//!
//! # Responsibility
//! - Provide habit CRUD and per-day completion toggling.
//! - Cascade habit deletion into the completion history.
//!
//! # Invariants
//! - The habit list is seeded with four defaults on first read.
//! - Deleting a habit writes the habit list before the pruned history; the
//!   cascade is best-effort, not atomic.
//! - Toggling is only recorded for habits present in the habit list.

use crate::clock::{generate_id, Clock};
use crate::model::habit::{default_habits, Habit, HabitHistory};
use crate::repo::document_store::{DocumentStore, StorageKey, StoreResult};
use crate::service::{load_or_default, load_or_seed};
use chrono::NaiveDate;
use log::{debug, info};

const HABIT_ID_PREFIX: &str = "habit_";

/// Habits and history loaded together for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitSnapshot {
    pub habits: Vec<Habit>,
    pub history: HabitHistory,
}

/// Habit service over a document store.
pub struct HabitService<S: DocumentStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: DocumentStore, C: Clock> HabitService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Returns the habit list, seeding defaults on first use.
    pub fn get_habits(&self) -> Vec<Habit> {
        load_or_seed(&self.store, StorageKey::Habits, default_habits)
    }

    /// Returns the completion history, or an empty one.
    pub fn get_habit_history(&self) -> HabitHistory {
        load_or_default(&self.store, StorageKey::HabitHistory)
    }

    /// Loads habits and history in one call.
    pub fn habit_snapshot(&self) -> HabitSnapshot {
        HabitSnapshot {
            habits: self.get_habits(),
            history: self.get_habit_history(),
        }
    }

    /// Appends a habit with a fresh id and returns the full list.
    pub fn add_habit(&self, label: impl Into<String>) -> StoreResult<Vec<Habit>> {
        let mut habits = self.get_habits();
        let id = generate_id(HABIT_ID_PREFIX, self.clock.now_millis(), |candidate| {
            habits.iter().any(|habit| habit.id == candidate)
        });
        habits.push(Habit::new(id.clone(), label));
        self.save_habits(&habits)?;

        info!("event=habit_add module=habit status=ok habit_id={id}");
        Ok(habits)
    }

    /// Renames a habit in place. Unknown ids leave the list unchanged.
    pub fn update_habit(&self, habit_id: &str, label: impl Into<String>) -> StoreResult<Vec<Habit>> {
        let mut habits = self.get_habits();
        let Some(habit) = habits.iter_mut().find(|habit| habit.id == habit_id) else {
            debug!("event=habit_update module=habit status=not_found habit_id={habit_id}");
            return Ok(habits);
        };
        habit.label = label.into();
        self.save_habits(&habits)?;

        info!("event=habit_update module=habit status=ok habit_id={habit_id}");
        Ok(habits)
    }

    /// Removes a habit and every history entry referencing it.
    ///
    /// History is cleaned even when the habit itself is already gone, so a
    /// previously interrupted cascade is finished here.
    pub fn delete_habit(&self, habit_id: &str) -> StoreResult<Vec<Habit>> {
        let mut habits = self.get_habits();
        let mut history = self.get_habit_history();

        let before = habits.len();
        habits.retain(|habit| habit.id != habit_id);
        if habits.len() != before {
            self.save_habits(&habits)?;
        }

        if history.remove_habit(habit_id) {
            self.store.set(StorageKey::HabitHistory, &history)?;
        }

        info!(
            "event=habit_delete module=habit status=ok habit_id={} removed={}",
            habit_id,
            habits.len() != before
        );
        Ok(habits)
    }

    /// Flips completion of `habit_id` on `date` and returns the full history.
    pub fn toggle_habit_for_today(
        &self,
        habit_id: &str,
        date: NaiveDate,
    ) -> StoreResult<HabitHistory> {
        let mut history = self.get_habit_history();
        if !self.get_habits().iter().any(|habit| habit.id == habit_id) {
            debug!("event=habit_toggle module=habit status=not_found habit_id={habit_id}");
            return Ok(history);
        }

        let completed = history.toggle(date, habit_id);
        self.store.set(StorageKey::HabitHistory, &history)?;

        debug!(
            "event=habit_toggle module=habit status=ok habit_id={} date={} completed={}",
            habit_id, date, completed
        );
        Ok(history)
    }

    fn save_habits(&self, habits: &[Habit]) -> StoreResult<()> {
        self.store.set(StorageKey::Habits, &habits)
    }
}
