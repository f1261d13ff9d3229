//! Weekly task plan model.
//!
//! # Responsibility
//! - Define weeks, their ordered task lists and task completion state.
//! - Provide the seeded four-week plan and task partial updates.
//!
//! # Invariants
//! - `completed_date` is `Some` only while `completed` is true, when changed
//!   through `set_completed`/`toggle_completed`.
//! - Task order inside a week is insertion order.

use crate::model::patch::{merge_field, Patch};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable task identifier (`t<n>`).
pub type TaskId = String;

/// Number of weeks in the default plan.
pub const DEFAULT_WEEK_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Display label for the day range, e.g. `Days 1-3`.
    pub days: String,
    pub desc: String,
    /// Optional link to supporting material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl Task {
    fn seeded(id: &str, days: &str, desc: &str) -> Self {
        Self {
            id: id.to_string(),
            days: days.to_string(),
            desc: desc.to_string(),
            resource: None,
            completed: false,
            completed_date: None,
        }
    }

    /// Sets completion, stamping `today` on completion and clearing the
    /// stamp otherwise.
    pub fn set_completed(&mut self, completed: bool, today: NaiveDate) {
        self.completed = completed;
        self.completed_date = completed.then_some(today);
    }

    /// Flips completion and returns the new state.
    pub fn toggle_completed(&mut self, today: NaiveDate) -> bool {
        self.set_completed(!self.completed, today);
        self.completed
    }

    /// Returns whether this task was completed on `date`.
    pub fn completed_on(&self, date: NaiveDate) -> bool {
        self.completed && self.completed_date == Some(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// One-based week number.
    pub week: u32,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Week {
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}

/// The seeded plan: four weeks, nine tasks.
pub fn default_weeks() -> Vec<Week> {
    vec![
        Week {
            week: 1,
            title: "Week 1".to_string(),
            tasks: vec![
                Task::seeded("t1", "Days 1-3", "Set up your workspace and tools"),
                Task::seeded("t2", "Days 4-7", "Create your daily schedule"),
            ],
        },
        Week {
            week: 2,
            title: "Week 2".to_string(),
            tasks: vec![
                Task::seeded("t3", "Days 8-10", "Focus on core habits"),
                Task::seeded("t4", "Days 11-14", "Track and adjust your progress"),
            ],
        },
        Week {
            week: 3,
            title: "Week 3".to_string(),
            tasks: vec![
                Task::seeded("t5", "Days 15-18", "Increase focus time blocks"),
                Task::seeded("t6", "Days 19-21", "Minimize distractions"),
            ],
        },
        Week {
            week: 4,
            title: "Week 4".to_string(),
            tasks: vec![
                Task::seeded("t7", "Days 22-25", "Maintain your streak"),
                Task::seeded("t8", "Days 26-28", "Review and celebrate wins"),
                Task::seeded("t9", "Days 29-30", "Plan for the next month"),
            ],
        },
    ]
}

/// Input for appending a task to a week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Day-range label; defaults to `Day {N+1}` when omitted.
    pub days: Option<String>,
    pub desc: String,
    pub resource: Option<String>,
}

impl NewTask {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_task(self, id: TaskId, existing_count: usize) -> Task {
        Task {
            id,
            days: self
                .days
                .unwrap_or_else(|| format!("Day {}", existing_count + 1)),
            desc: self.desc,
            resource: self.resource,
            completed: false,
            completed_date: None,
        }
    }
}

/// Partial task update. Fields are merged literally; setting `completed`
/// here does not stamp `completed_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub days: Option<String>,
    pub desc: Option<String>,
    pub resource: Option<Option<String>>,
    pub completed: Option<bool>,
    pub completed_date: Option<Option<NaiveDate>>,
}

impl Patch<Task> for TaskPatch {
    fn apply_to(self, target: &mut Task) {
        merge_field(&mut target.days, self.days);
        merge_field(&mut target.desc, self.desc);
        merge_field(&mut target.resource, self.resource);
        merge_field(&mut target.completed, self.completed);
        merge_field(&mut target.completed_date, self.completed_date);
    }

    fn is_empty(&self) -> bool {
        self.days.is_none()
            && self.desc.is_none()
            && self.resource.is_none()
            && self.completed.is_none()
            && self.completed_date.is_none()
    }
}
