//! Pure aggregation over loaded snapshots.
//!
//! # Responsibility
//! - Compute progress percentages, habit statistics, streaks and calendar
//!   indicators for UI collaborators.
//!
//! # Invariants
//! - No function here performs I/O or reads the clock; "today" is an input.
//! - Percentages round half up and are `0` when the denominator is `0`.

pub mod calendar;
pub mod habit_stats;
pub mod progress;

/// Rounded `100 * completed / total`, or `0` when `total == 0`.
pub fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(9, 9), 100);
    }
}
