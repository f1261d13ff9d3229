//! Weekly task use-case service.
//!
//! # Responsibility
//! - Provide CRUD over tasks inside the fixed week plan.
//! - Stamp completion dates from the injected clock.
//!
//! # Invariants
//! - The plan is seeded with the default four weeks on first read.
//! - Week indexes are zero-based positions in the stored sequence.
//! - Task ids are unique across all weeks.

use crate::clock::{generate_id, Clock};
use crate::model::patch::apply_patch;
use crate::model::task::{default_weeks, NewTask, TaskPatch, Week};
use crate::repo::document_store::{DocumentStore, StorageKey, StoreError, StoreResult};
use crate::service::load_or_seed;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_ID_PREFIX: &str = "t";

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Week index is outside the stored plan.
    WeekNotFound(usize),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeekNotFound(index) => write!(f, "week not found at index {index}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::WeekNotFound(_) => None,
        }
    }
}

impl From<StoreError> for TaskServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Task service over a document store.
pub struct TaskService<S: DocumentStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: DocumentStore, C: Clock> TaskService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Returns the week plan, seeding the default plan on first use.
    pub fn get_weeks(&self) -> Vec<Week> {
        load_or_seed(&self.store, StorageKey::Weeks, default_weeks)
    }

    /// Flips completion of one task, stamping or clearing its completion date.
    ///
    /// # Errors
    /// - `WeekNotFound` when `week_index` is out of range.
    ///
    /// An unknown `task_id` inside a valid week returns the weeks unchanged.
    pub fn toggle_task_complete(
        &self,
        week_index: usize,
        task_id: &str,
    ) -> Result<Vec<Week>, TaskServiceError> {
        let mut weeks = self.get_weeks();
        let week = weeks
            .get_mut(week_index)
            .ok_or(TaskServiceError::WeekNotFound(week_index))?;

        let Some(task) = week.find_task_mut(task_id) else {
            debug!("event=task_toggle module=task status=not_found week_index={week_index} task_id={task_id}");
            return Ok(weeks);
        };
        let completed = task.toggle_completed(self.clock.today());
        self.save_weeks(&weeks)?;

        info!(
            "event=task_toggle module=task status=ok week_index={} task_id={} completed={}",
            week_index, task_id, completed
        );
        Ok(weeks)
    }

    /// Appends a new incomplete task to one week.
    pub fn add_task(&self, week_index: usize, new_task: NewTask) -> StoreResult<Vec<Week>> {
        let mut weeks = self.get_weeks();
        if week_index >= weeks.len() {
            warn!("event=task_add module=task status=week_not_found week_index={week_index}");
            return Ok(weeks);
        }

        let id = generate_id(TASK_ID_PREFIX, self.clock.now_millis(), |candidate| {
            weeks
                .iter()
                .any(|week| week.find_task(candidate).is_some())
        });
        let week = &mut weeks[week_index];
        let task = new_task.into_task(id.clone(), week.tasks.len());
        week.tasks.push(task);
        self.save_weeks(&weeks)?;

        info!("event=task_add module=task status=ok week_index={week_index} task_id={id}");
        Ok(weeks)
    }

    /// Merges `patch` into one task.
    pub fn update_task(
        &self,
        week_index: usize,
        task_id: &str,
        patch: TaskPatch,
    ) -> StoreResult<Vec<Week>> {
        let mut weeks = self.get_weeks();
        let Some(task) = weeks
            .get_mut(week_index)
            .and_then(|week| week.find_task_mut(task_id))
        else {
            debug!("event=task_update module=task status=not_found week_index={week_index} task_id={task_id}");
            return Ok(weeks);
        };
        apply_patch(task, patch);
        self.save_weeks(&weeks)?;

        info!("event=task_update module=task status=ok week_index={week_index} task_id={task_id}");
        Ok(weeks)
    }

    /// Removes one task from a week.
    pub fn delete_task(&self, week_index: usize, task_id: &str) -> StoreResult<Vec<Week>> {
        let mut weeks = self.get_weeks();
        let Some(week) = weeks.get_mut(week_index) else {
            warn!("event=task_delete module=task status=week_not_found week_index={week_index}");
            return Ok(weeks);
        };

        let before = week.tasks.len();
        week.tasks.retain(|task| task.id != task_id);
        if week.tasks.len() == before {
            debug!("event=task_delete module=task status=not_found week_index={week_index} task_id={task_id}");
            return Ok(weeks);
        }
        self.save_weeks(&weeks)?;

        info!("event=task_delete module=task status=ok week_index={week_index} task_id={task_id}");
        Ok(weeks)
    }

    /// Sets the display title of one week.
    pub fn rename_week(&self, week_index: usize, title: impl Into<String>) -> StoreResult<Vec<Week>> {
        let mut weeks = self.get_weeks();
        let Some(week) = weeks.get_mut(week_index) else {
            warn!("event=week_rename module=task status=week_not_found week_index={week_index}");
            return Ok(weeks);
        };
        week.title = title.into();
        self.save_weeks(&weeks)?;

        info!("event=week_rename module=task status=ok week_index={week_index}");
        Ok(weeks)
    }

    fn save_weeks(&self, weeks: &[Week]) -> StoreResult<()> {
        self.store.set(StorageKey::Weeks, &weeks)
    }
}
