//! Habit completion statistics and streaks.

use crate::clock::days_before;
use crate::model::habit::{Habit, HabitHistory};
use crate::report::percent;
use chrono::NaiveDate;

/// How far back a streak walk looks.
pub const STREAK_WINDOW_DAYS: u64 = 365;

/// Share of habits completed on `date`, `0` when there are no habits.
///
/// Flags left by deleted habits are capped so the result stays within 100.
pub fn daily_completion_percent(habits: &[Habit], history: &HabitHistory, date: NaiveDate) -> u32 {
    let completed = history.completed_count(date).min(habits.len());
    percent(completed, habits.len())
}

/// Returns whether every habit is complete on `date`. False without habits.
pub fn all_habits_completed(habits: &[Habit], history: &HabitHistory, date: NaiveDate) -> bool {
    !habits.is_empty()
        && habits
            .iter()
            .all(|habit| history.is_completed(date, habit.id.as_str()))
}

/// Consecutive fully-completed days ending at `today`.
///
/// Walks back from `today` (inclusive). An incomplete `today` is skipped
/// without ending the walk; the first incomplete day before `today` ends
/// it.
pub fn habit_streak(habits: &[Habit], history: &HabitHistory, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let date = days_before(today, offset);
        if all_habits_completed(habits, history, date) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// Completed flags across all recorded days relative to the possible total
/// (`recorded days * habit count`).
pub fn overall_habit_progress(habits: &[Habit], history: &HabitHistory) -> u32 {
    let recorded_days = history.len();
    if recorded_days == 0 || habits.is_empty() {
        return 0;
    }
    percent(
        total_habits_completed(history),
        recorded_days * habits.len(),
    )
}

/// Share of recorded days on which `habit_id` was completed.
///
/// An empty history counts as one recorded day, so the result is `0`.
pub fn habit_completion_percent(habit_id: &str, history: &HabitHistory) -> u32 {
    let completed_days = history
        .iter()
        .filter(|(_, day)| day.get(habit_id).copied().unwrap_or(false))
        .count();
    percent(completed_days, history.len().max(1))
}

/// Number of `true` flags in the whole history.
pub fn total_habits_completed(history: &HabitHistory) -> usize {
    history
        .iter()
        .map(|(_, day)| day.values().filter(|done| **done).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{
        daily_completion_percent, habit_completion_percent, habit_streak, overall_habit_progress,
    };
    use crate::model::habit::{Habit, HabitHistory};
    use chrono::NaiveDate;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    #[test]
    fn streak_is_zero_without_habits() {
        let mut history = HabitHistory::new();
        history.set_completed(day(10), "a", true);
        assert_eq!(habit_streak(&[], &history, day(10)), 0);
    }

    #[test]
    fn overall_progress_uses_recorded_days_only() {
        let habits = vec![Habit::new("a", "A"), Habit::new("b", "B")];
        let mut history = HabitHistory::new();
        history.set_completed(day(1), "a", true);
        history.set_completed(day(2), "a", true);
        history.set_completed(day(2), "b", true);
        assert_eq!(overall_habit_progress(&habits, &history), 75);
    }

    #[test]
    fn habit_completion_percent_counts_days_with_true_flag() {
        let mut history = HabitHistory::new();
        assert_eq!(habit_completion_percent("a", &history), 0);

        history.set_completed(day(1), "a", true);
        history.set_completed(day(2), "b", true);
        history.set_completed(day(3), "a", false);
        history.set_completed(day(3), "b", true);
        // 1 of 3 recorded days.
        assert_eq!(habit_completion_percent("a", &history), 33);
        assert_eq!(habit_completion_percent("b", &history), 67);
        assert_eq!(habit_completion_percent("missing", &history), 0);
    }

    #[test]
    fn daily_percent_caps_flags_left_by_deleted_habits() {
        let habits = vec![Habit::new("a", "A")];
        let mut history = HabitHistory::new();
        history.set_completed(day(4), "a", true);
        history.set_completed(day(4), "gone", true);
        assert_eq!(daily_completion_percent(&habits, &history, day(4)), 100);
        assert_eq!(daily_completion_percent(&[], &history, day(4)), 0);
    }
}
