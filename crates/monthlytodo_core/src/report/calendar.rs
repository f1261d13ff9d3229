//! Calendar views over habit history and task completion dates.

use crate::clock::days_before;
use crate::model::habit::{Habit, HabitHistory};
use crate::model::task::{Task, Week};
use chrono::{Datelike, NaiveDate};

/// Cells in a month grid: six Sunday-first weeks.
pub const MONTH_GRID_CELLS: usize = 42;

/// Dot indicators for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayIndicators {
    /// At least one habit flag is `true`.
    pub has_habits: bool,
    /// At least one task was completed on this date.
    pub has_tasks: bool,
}

/// What was completed on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetails {
    pub date: NaiveDate,
    pub completed_habits: Vec<Habit>,
    pub completed_tasks: Vec<Task>,
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month, 1-based.
    pub day: u32,
    /// False for leading/trailing cells from adjacent months.
    pub is_current_month: bool,
}

pub fn day_indicators(history: &HabitHistory, weeks: &[Week], date: NaiveDate) -> DayIndicators {
    DayIndicators {
        has_habits: history.completed_count(date) > 0,
        has_tasks: completed_tasks_on(weeks, date).next().is_some(),
    }
}

/// Habits (in list order) and tasks (in plan order) completed on `date`.
pub fn day_details(
    habits: &[Habit],
    history: &HabitHistory,
    weeks: &[Week],
    date: NaiveDate,
) -> DayDetails {
    DayDetails {
        date,
        completed_habits: habits
            .iter()
            .filter(|habit| history.is_completed(date, habit.id.as_str()))
            .cloned()
            .collect(),
        completed_tasks: completed_tasks_on(weeks, date).cloned().collect(),
    }
}

fn completed_tasks_on(weeks: &[Week], date: NaiveDate) -> impl Iterator<Item = &Task> {
    weeks
        .iter()
        .flat_map(|week| week.tasks.iter())
        .filter(move |task| task.completed_on(date))
}

/// Sunday-first 42-cell grid for `month` (1-12) of `year`.
///
/// Returns `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = u64::from(first.weekday().num_days_from_sunday());
    let start = days_before(first, leading);

    let cells = start
        .iter_days()
        .take(MONTH_GRID_CELLS)
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            is_current_month: date.month() == month && date.year() == year,
        })
        .collect();
    Some(cells)
}

/// The `count` most recent dates ending at `today`, newest first.
pub fn recent_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count as u64)
        .map(|offset| days_before(today, offset))
        .collect()
}

/// Whether there is anything to show in history views.
pub fn has_any_data(history: &HabitHistory, weeks: &[Week]) -> bool {
    !history.is_empty()
        || weeks
            .iter()
            .any(|week| week.tasks.iter().any(|task| task.completed))
}

#[cfg(test)]
mod tests {
    use super::{day_details, day_indicators, has_any_data, month_grid, recent_days};
    use crate::model::habit::{default_habits, HabitHistory};
    use crate::model::task::default_weeks;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_grid_starts_on_sunday_and_has_six_weeks() {
        // 2024-05-01 is a Wednesday.
        let grid = month_grid(2024, 5).unwrap();
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].date, date(2024, 4, 28));
        assert_eq!(grid[0].date.weekday(), Weekday::Sun);
        assert!(!grid[0].is_current_month);
        assert_eq!(grid[3].date, date(2024, 5, 1));
        assert!(grid[3].is_current_month);
        assert_eq!(grid[3].day, 1);
        assert_eq!(grid.iter().filter(|cell| cell.is_current_month).count(), 31);
    }

    #[test]
    fn month_grid_rejects_invalid_month() {
        assert!(month_grid(2024, 13).is_none());
        assert!(month_grid(2024, 0).is_none());
    }

    #[test]
    fn recent_days_are_newest_first() {
        let days = recent_days(date(2024, 3, 2), 3);
        assert_eq!(days, vec![date(2024, 3, 2), date(2024, 3, 1), date(2024, 2, 29)]);
    }

    #[test]
    fn indicators_and_details_follow_completion_dates() {
        let habits = default_habits();
        let mut history = HabitHistory::new();
        history.set_completed(date(2024, 1, 5), "habit_2", true);

        let mut weeks = default_weeks();
        weeks[1].tasks[0].set_completed(true, date(2024, 1, 5));

        let indicators = day_indicators(&history, &weeks, date(2024, 1, 5));
        assert!(indicators.has_habits);
        assert!(indicators.has_tasks);
        assert_eq!(
            day_indicators(&history, &weeks, date(2024, 1, 6)),
            Default::default()
        );

        let details = day_details(&habits, &history, &weeks, date(2024, 1, 5));
        assert_eq!(details.completed_habits.len(), 1);
        assert_eq!(details.completed_habits[0].id, "habit_2");
        assert_eq!(details.completed_tasks.len(), 1);
        assert_eq!(details.completed_tasks[0].id, "t3");
    }

    #[test]
    fn has_any_data_is_false_for_fresh_state() {
        let mut weeks = default_weeks();
        assert!(!has_any_data(&HabitHistory::new(), &weeks));
        weeks[0].tasks[0].set_completed(true, date(2024, 1, 1));
        assert!(has_any_data(&HabitHistory::new(), &weeks));
    }
}
