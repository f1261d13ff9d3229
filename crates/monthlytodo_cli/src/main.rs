//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `monthlytodo_core` linkage.
//! - Exercise seeding, toggling and reporting against an in-memory database.

use monthlytodo_core::db::open_db_in_memory;
use monthlytodo_core::report::habit_stats::habit_streak;
use monthlytodo_core::{
    calculate_progress, Clock, HabitService, NullScheduler, ReminderService,
    SqliteDocumentStore, SystemClock, TaskService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("monthlytodo_core ping={}", monthlytodo_core::ping());
    println!("monthlytodo_core version={}", monthlytodo_core::core_version());

    match run_smoke() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let store = SqliteDocumentStore::try_new(&conn)?;
    let clock = SystemClock;
    let today = clock.today();

    let habits = HabitService::new(&store, clock);
    let tasks = TaskService::new(&store, clock);
    let reminders = ReminderService::new(&store, NullScheduler, clock);

    let seeded = habits.get_habits();
    for habit in &seeded {
        habits.toggle_habit_for_today(&habit.id, today)?;
    }
    let weeks = tasks.toggle_task_complete(0, "t1")?;

    let snapshot = habits.habit_snapshot();
    let progress = calculate_progress(&weeks);
    println!(
        "habits={} streak={}",
        seeded.len(),
        habit_streak(&snapshot.habits, &snapshot.history, today)
    );
    println!(
        "tasks completed={}/{} percent={}",
        progress.completed, progress.total, progress.percent
    );
    println!(
        "reminders stored={} default_mode={}",
        reminders.ensure_default_reminders()?.len(),
        reminders.get_reminder_settings().use_default
    );
    Ok(())
}
