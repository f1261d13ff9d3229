//! Task plan progress.

use crate::model::task::Week;
use crate::report::percent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl Progress {
    fn from_counts(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percent: percent(completed, total),
        }
    }
}

/// Completion across every task of every week.
pub fn calculate_progress(weeks: &[Week]) -> Progress {
    let (completed, total) = weeks
        .iter()
        .flat_map(|week| week.tasks.iter())
        .fold((0, 0), |(completed, total), task| {
            (completed + usize::from(task.completed), total + 1)
        });
    Progress::from_counts(completed, total)
}

/// Completion for one week; zero progress for an invalid index.
pub fn week_progress(weeks: &[Week], week_index: usize) -> Progress {
    weeks
        .get(week_index)
        .map(|week| {
            let completed = week.tasks.iter().filter(|task| task.completed).count();
            Progress::from_counts(completed, week.tasks.len())
        })
        .unwrap_or_default()
}
