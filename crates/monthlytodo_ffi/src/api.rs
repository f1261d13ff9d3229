//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Map core records into flat envelope structs the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Entry calls are serialized; each opens its own connection.
//! - Notification scheduling stays on the Dart side: handles are passed in
//!   as plain strings and stored verbatim.

use chrono::NaiveDate;
use monthlytodo_core::clock::{date_key, parse_date_key};
use monthlytodo_core::db::open_db;
use monthlytodo_core::report::calendar::{day_details, day_indicators, month_grid};
use monthlytodo_core::report::habit_stats::{
    daily_completion_percent, habit_completion_percent, habit_streak, overall_habit_progress,
    total_habits_completed,
};
use monthlytodo_core::{
    calculate_progress, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, week_progress, Clock, Habit, HabitHistory, HabitService, NewTask,
    NullScheduler, Reminder, ReminderDraft, ReminderPatch, ReminderService, ReminderTime,
    ResetService, SqliteDocumentStore, SystemClock, Task, TaskPatch, TaskService, Week,
};
use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const ENTRY_DB_FILE_NAME: &str = "monthlytodo_entry.sqlite3";
const ENTRY_DB_PATH_ENV: &str = "MONTHLYTODO_DB_PATH";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static ENTRY_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive), or
///   empty for the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Habit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    pub id: String,
    pub label: String,
}

/// Habit ids completed on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDayItem {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub completed_habit_ids: Vec<String>,
}

/// Task row inside a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub days: String,
    pub desc: String,
    pub resource: Option<String>,
    pub completed: bool,
    /// `YYYY-MM-DD`, present only while completed.
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekItem {
    pub week: u32,
    pub title: String,
    pub tasks: Vec<TaskItem>,
}

/// Reminder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: String,
    pub message: String,
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub notification_id: Option<String>,
    pub is_active: bool,
    pub is_alarm: Option<bool>,
}

/// Habit list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListResponse {
    pub ok: bool,
    pub habits: Vec<HabitItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Habit history envelope; days are in ascending date order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitHistoryResponse {
    pub ok: bool,
    pub days: Vec<HabitDayItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekListResponse {
    pub ok: bool,
    pub weeks: Vec<WeekItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderListResponse {
    pub ok: bool,
    pub reminders: Vec<ReminderItem>,
    pub message: String,
}

/// Dashboard numbers in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressResponse {
    pub ok: bool,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub task_percent: u32,
    /// Share of habits completed today.
    pub today_habit_percent: u32,
    pub streak: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettingsResponse {
    pub ok: bool,
    pub use_default: bool,
    pub message: String,
}

/// Reminder list after an operation that may drop host triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSwitchResponse {
    pub ok: bool,
    pub reminders: Vec<ReminderItem>,
    /// Handles Dart scheduled earlier that are no longer stored; Dart must
    /// cancel them.
    pub cancelled_notification_ids: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekProgressResponse {
    pub ok: bool,
    pub completed: u32,
    pub total: u32,
    pub percent: u32,
    pub message: String,
}

/// Per-habit completion share over recorded days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStatItem {
    pub id: String,
    pub label: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStatsResponse {
    pub ok: bool,
    pub overall_percent: u32,
    pub total_completed: u32,
    pub streak: u32,
    pub habits: Vec<HabitStatItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetailsResponse {
    pub ok: bool,
    pub date: String,
    pub completed_habits: Vec<HabitItem>,
    pub completed_tasks: Vec<TaskItem>,
    pub message: String,
}

/// One month-grid cell with its activity dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    pub date: String,
    pub day: u32,
    pub is_current_month: bool,
    pub has_habits: bool,
    pub has_tasks: bool,
}

/// Sunday-first 42-cell month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    pub ok: bool,
    pub cells: Vec<CalendarCellItem>,
    pub message: String,
}

/// Returns the habit list, seeding defaults on first call.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_list() -> HabitListResponse {
    habit_list_response(
        "habits_list",
        with_entry_store(|store| Ok(HabitService::new(store, SystemClock).get_habits())),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(label: String) -> HabitListResponse {
    habit_list_response(
        "habit_add",
        with_entry_store(|store| {
            HabitService::new(store, SystemClock)
                .add_habit(label.trim())
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_update(habit_id: String, label: String) -> HabitListResponse {
    habit_list_response(
        "habit_update",
        with_entry_store(|store| {
            HabitService::new(store, SystemClock)
                .update_habit(&habit_id, label.trim())
                .map_err(|err| err.to_string())
        }),
    )
}

/// Deletes a habit and its completion history.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(habit_id: String) -> HabitListResponse {
    habit_list_response(
        "habit_delete",
        with_entry_store(|store| {
            HabitService::new(store, SystemClock)
                .delete_habit(&habit_id)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn habit_history() -> HabitHistoryResponse {
    habit_history_response(
        "habit_history",
        with_entry_store(|store| Ok(HabitService::new(store, SystemClock).get_habit_history())),
    )
}

/// Flips one habit on `date` (`YYYY-MM-DD`), or on today when `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(habit_id: String, date: Option<String>) -> HabitHistoryResponse {
    habit_history_response(
        "habit_toggle",
        with_entry_store(|store| {
            let date = resolve_date(date.as_deref())?;
            HabitService::new(store, SystemClock)
                .toggle_habit_for_today(&habit_id, date)
                .map_err(|err| err.to_string())
        }),
    )
}

/// Returns the week plan, seeding the default four weeks on first call.
#[flutter_rust_bridge::frb(sync)]
pub fn weeks_list() -> WeekListResponse {
    week_list_response(
        "weeks_list",
        with_entry_store(|store| Ok(TaskService::new(store, SystemClock).get_weeks())),
    )
}

/// Flips completion of one task. Fails for an out-of-range week.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(week_index: u32, task_id: String) -> WeekListResponse {
    week_list_response(
        "task_toggle",
        with_entry_store(|store| {
            TaskService::new(store, SystemClock)
                .toggle_task_complete(week_index as usize, &task_id)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    week_index: u32,
    desc: String,
    days: Option<String>,
    resource: Option<String>,
) -> WeekListResponse {
    let new_task = NewTask {
        days: normalize_optional(days),
        desc: desc.trim().to_string(),
        resource: normalize_optional(resource),
    };
    week_list_response(
        "task_add",
        with_entry_store(|store| {
            TaskService::new(store, SystemClock)
                .add_task(week_index as usize, new_task)
                .map_err(|err| err.to_string())
        }),
    )
}

/// Updates task text fields; `None` leaves a field unchanged and an empty
/// `resource` clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    week_index: u32,
    task_id: String,
    desc: Option<String>,
    days: Option<String>,
    resource: Option<String>,
) -> WeekListResponse {
    let patch = TaskPatch {
        desc: desc.map(|value| value.trim().to_string()),
        days: days.map(|value| value.trim().to_string()),
        resource: resource.map(|value| normalize_optional(Some(value))),
        ..TaskPatch::default()
    };
    week_list_response(
        "task_update",
        with_entry_store(|store| {
            TaskService::new(store, SystemClock)
                .update_task(week_index as usize, &task_id, patch)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(week_index: u32, task_id: String) -> WeekListResponse {
    week_list_response(
        "task_delete",
        with_entry_store(|store| {
            TaskService::new(store, SystemClock)
                .delete_task(week_index as usize, &task_id)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn week_rename(week_index: u32, title: String) -> WeekListResponse {
    week_list_response(
        "week_rename",
        with_entry_store(|store| {
            TaskService::new(store, SystemClock)
                .rename_week(week_index as usize, title.trim())
                .map_err(|err| err.to_string())
        }),
    )
}

/// Task progress, today's habit percentage and the current streak.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_summary() -> ProgressResponse {
    let result = with_entry_store(|store| {
        let clock = SystemClock;
        let weeks = TaskService::new(store, clock).get_weeks();
        let snapshot = HabitService::new(store, clock).habit_snapshot();
        let today = clock.today();
        Ok((
            calculate_progress(&weeks),
            daily_completion_percent(&snapshot.habits, &snapshot.history, today),
            habit_streak(&snapshot.habits, &snapshot.history, today),
        ))
    });
    match result {
        Ok((progress, today_habit_percent, streak)) => ProgressResponse {
            ok: true,
            completed_tasks: progress.completed as u32,
            total_tasks: progress.total as u32,
            task_percent: progress.percent,
            today_habit_percent,
            streak,
            message: format!("{}% of tasks done.", progress.percent),
        },
        Err(err) => ProgressResponse {
            ok: false,
            completed_tasks: 0,
            total_tasks: 0,
            task_percent: 0,
            today_habit_percent: 0,
            streak: 0,
            message: format!("progress_summary failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list() -> ReminderListResponse {
    reminder_list_response(
        "reminders_list",
        with_entry_store(|store| Ok(reminder_service(store).get_reminders())),
    )
}

/// Stores a reminder whose trigger Dart has already scheduled (or not).
///
/// `date` defaults to today; `time` must be `HH:MM`.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_add(
    message: String,
    date: Option<String>,
    time: String,
    is_active: bool,
    notification_id: Option<String>,
) -> ReminderListResponse {
    reminder_list_response(
        "reminder_add",
        with_entry_store(|store| {
            let mut draft = ReminderDraft::new(
                message.trim(),
                resolve_date(date.as_deref())?,
                parse_time(&time)?,
            );
            draft.is_active = is_active;
            draft.notification_id = normalize_optional(notification_id);
            reminder_service(store)
                .add_reminder(draft)
                .map_err(|err| err.to_string())
        }),
    )
}

/// Replaces the editable fields and the notification handle of a reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_update(
    reminder_id: String,
    message: String,
    date: String,
    time: String,
    is_active: bool,
    notification_id: Option<String>,
) -> ReminderListResponse {
    reminder_list_response(
        "reminder_update",
        with_entry_store(|store| {
            let patch = ReminderPatch {
                message: Some(message.trim().to_string()),
                date: Some(resolve_date(Some(date.as_str()))?),
                time: Some(parse_time(&time)?),
                notification_id: Some(normalize_optional(notification_id)),
                is_active: Some(is_active),
                is_alarm: None,
            };
            reminder_service(store)
                .update_reminder(&reminder_id, patch)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(reminder_id: String) -> ReminderListResponse {
    reminder_list_response(
        "reminder_delete",
        with_entry_store(|store| {
            reminder_service(store)
                .delete_reminder(&reminder_id)
                .map_err(|err| err.to_string())
        }),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminder_settings() -> ReminderSettingsResponse {
    match with_entry_store(|store| Ok(reminder_service(store).get_reminder_settings())) {
        Ok(settings) => ReminderSettingsResponse {
            ok: true,
            use_default: settings.use_default,
            message: String::new(),
        },
        Err(err) => ReminderSettingsResponse {
            ok: false,
            use_default: true,
            message: format!("reminder_settings failed: {err}"),
        },
    }
}

/// Activates or deactivates a reminder.
///
/// The old handle is returned for Dart to cancel. When activating, pass the
/// handle of the trigger Dart just scheduled.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_set_active(
    reminder_id: String,
    active: bool,
    notification_id: Option<String>,
) -> ReminderSwitchResponse {
    reminder_switch_response(
        "reminder_set_active",
        with_entry_store(|store| {
            let service = reminder_service(store);
            let dropped = notification_id_of(&service, &reminder_id);
            let mut reminders = service
                .set_reminder_active(&reminder_id, active)
                .map_err(|err| err.to_string())?;
            if let Some(handle) = normalize_optional(notification_id).filter(|_| active) {
                reminders = service
                    .update_reminder(
                        &reminder_id,
                        ReminderPatch {
                            notification_id: Some(Some(handle)),
                            ..ReminderPatch::default()
                        },
                    )
                    .map_err(|err| err.to_string())?;
            }
            Ok((reminders, dropped))
        }),
    )
}

/// Flips a reminder between active and inactive. The new state carries no
/// handle until Dart schedules it and stores one via `reminder_update`.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_toggle_active(reminder_id: String) -> ReminderSwitchResponse {
    reminder_switch_response(
        "reminder_toggle_active",
        with_entry_store(|store| {
            let service = reminder_service(store);
            let dropped = notification_id_of(&service, &reminder_id);
            let reminders = service
                .toggle_reminder_active(&reminder_id)
                .map_err(|err| err.to_string())?;
            Ok((reminders, dropped))
        }),
    )
}

/// Switches reminder mode and returns the reminders now in effect.
///
/// Returned reminders carry no notification handles; Dart cancels
/// `cancelled_notification_ids`, schedules the new set and stores handles
/// through `reminder_update`.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_mode_set(use_default: bool) -> ReminderSwitchResponse {
    reminder_switch_response(
        "reminder_mode_set",
        with_entry_store(|store| {
            let service = reminder_service(store);
            let dropped = service.live_notification_ids();
            let reminders = service
                .set_reminder_mode(use_default)
                .map_err(|err| err.to_string())?;
            Ok((reminders, dropped))
        }),
    )
}

/// Clears every stored document and restores the default reminders.
///
/// Same handle contract as `reminder_mode_set`.
#[flutter_rust_bridge::frb(sync)]
pub fn data_reset() -> ReminderSwitchResponse {
    reminder_switch_response(
        "data_reset",
        with_entry_store(|store| {
            let dropped = reminder_service(store).live_notification_ids();
            let reminders = ResetService::new(store, NullScheduler, SystemClock)
                .reset_and_restore_defaults()
                .map_err(|err| err.to_string())?;
            Ok((reminders, dropped))
        }),
    )
}

/// Completion for one week; zero progress for an invalid index.
#[flutter_rust_bridge::frb(sync)]
pub fn week_progress_get(week_index: u32) -> WeekProgressResponse {
    match with_entry_store(|store| {
        let weeks = TaskService::new(store, SystemClock).get_weeks();
        Ok(week_progress(&weeks, week_index as usize))
    }) {
        Ok(progress) => WeekProgressResponse {
            ok: true,
            completed: progress.completed as u32,
            total: progress.total as u32,
            percent: progress.percent,
            message: format!("{}% done.", progress.percent),
        },
        Err(err) => WeekProgressResponse {
            ok: false,
            completed: 0,
            total: 0,
            percent: 0,
            message: format!("week_progress_get failed: {err}"),
        },
    }
}

/// Overall, total and per-habit completion plus the current streak.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_stats_get() -> HabitStatsResponse {
    match with_entry_store(|store| {
        let clock = SystemClock;
        Ok((HabitService::new(store, clock).habit_snapshot(), clock.today()))
    }) {
        Ok((snapshot, today)) => HabitStatsResponse {
            ok: true,
            overall_percent: overall_habit_progress(&snapshot.habits, &snapshot.history),
            total_completed: total_habits_completed(&snapshot.history) as u32,
            streak: habit_streak(&snapshot.habits, &snapshot.history, today),
            habits: snapshot
                .habits
                .iter()
                .map(|habit| HabitStatItem {
                    id: habit.id.clone(),
                    label: habit.label.clone(),
                    percent: habit_completion_percent(&habit.id, &snapshot.history),
                })
                .collect(),
            message: format!("{} habit(s).", snapshot.habits.len()),
        },
        Err(err) => HabitStatsResponse {
            ok: false,
            overall_percent: 0,
            total_completed: 0,
            streak: 0,
            habits: Vec::new(),
            message: format!("habit_stats_get failed: {err}"),
        },
    }
}

/// Habits and tasks completed on `date` (`YYYY-MM-DD`), or today.
#[flutter_rust_bridge::frb(sync)]
pub fn day_details_get(date: Option<String>) -> DayDetailsResponse {
    match with_entry_store(|store| {
        let date = resolve_date(date.as_deref())?;
        let snapshot = HabitService::new(store, SystemClock).habit_snapshot();
        let weeks = TaskService::new(store, SystemClock).get_weeks();
        Ok(day_details(&snapshot.habits, &snapshot.history, &weeks, date))
    }) {
        Ok(details) => DayDetailsResponse {
            ok: true,
            date: date_key(details.date),
            message: format!(
                "{} habit(s), {} task(s).",
                details.completed_habits.len(),
                details.completed_tasks.len()
            ),
            completed_habits: details
                .completed_habits
                .into_iter()
                .map(to_habit_item)
                .collect(),
            completed_tasks: details
                .completed_tasks
                .into_iter()
                .map(to_task_item)
                .collect(),
        },
        Err(err) => DayDetailsResponse {
            ok: false,
            date: String::new(),
            completed_habits: Vec::new(),
            completed_tasks: Vec::new(),
            message: format!("day_details_get failed: {err}"),
        },
    }
}

/// Month grid for `month` (1-12) of `year` with habit and task dots.
#[flutter_rust_bridge::frb(sync)]
pub fn month_grid_get(year: i32, month: u32) -> MonthGridResponse {
    match with_entry_store(|store| {
        let cells = month_grid(year, month)
            .ok_or_else(|| format!("month must be 1-12, got {month}"))?;
        let history = HabitService::new(store, SystemClock).get_habit_history();
        let weeks = TaskService::new(store, SystemClock).get_weeks();
        Ok(cells
            .into_iter()
            .map(|cell| {
                let indicators = day_indicators(&history, &weeks, cell.date);
                CalendarCellItem {
                    date: date_key(cell.date),
                    day: cell.day,
                    is_current_month: cell.is_current_month,
                    has_habits: indicators.has_habits,
                    has_tasks: indicators.has_tasks,
                }
            })
            .collect::<Vec<_>>())
    }) {
        Ok(cells) => MonthGridResponse {
            ok: true,
            cells,
            message: format!("{year}-{month:02}"),
        },
        Err(err) => MonthGridResponse {
            ok: false,
            cells: Vec::new(),
            message: format!("month_grid_get failed: {err}"),
        },
    }
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ENTRY_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn with_entry_store<T>(
    f: impl FnOnce(&SqliteDocumentStore<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = ENTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        error!("event=entry_store_open module=ffi status=error error={err}");
        format!("entry DB open failed: {err}")
    })?;
    let store = SqliteDocumentStore::try_new(&conn)
        .map_err(|err| format!("entry store init failed: {err}"))?;
    f(&store)
}

fn reminder_service<'a>(
    store: &'a SqliteDocumentStore<'a>,
) -> ReminderService<&'a SqliteDocumentStore<'a>, NullScheduler, SystemClock> {
    ReminderService::new(store, NullScheduler, SystemClock)
}

fn notification_id_of(
    service: &ReminderService<&SqliteDocumentStore<'_>, NullScheduler, SystemClock>,
    reminder_id: &str,
) -> Vec<String> {
    service
        .get_reminders()
        .into_iter()
        .filter(|reminder| reminder.id == reminder_id)
        .filter_map(|reminder| reminder.notification_id)
        .collect()
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => {
            parse_date_key(value).ok_or_else(|| format!("date must be YYYY-MM-DD, got `{value}`"))
        }
        None => Ok(SystemClock.today()),
    }
}

fn parse_time(raw: &str) -> Result<ReminderTime, String> {
    raw.parse::<ReminderTime>().map_err(|err| err.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn habit_list_response(op: &str, result: Result<Vec<Habit>, String>) -> HabitListResponse {
    match result {
        Ok(habits) => HabitListResponse {
            ok: true,
            message: format!("{} habit(s).", habits.len()),
            habits: habits.into_iter().map(to_habit_item).collect(),
        },
        Err(err) => HabitListResponse {
            ok: false,
            habits: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn habit_history_response(op: &str, result: Result<HabitHistory, String>) -> HabitHistoryResponse {
    match result {
        Ok(history) => HabitHistoryResponse {
            ok: true,
            message: format!("{} day(s) recorded.", history.len()),
            days: history
                .iter()
                .map(|(date, flags)| HabitDayItem {
                    date: date_key(*date),
                    completed_habit_ids: flags
                        .iter()
                        .filter(|(_, done)| **done)
                        .map(|(id, _)| id.clone())
                        .collect(),
                })
                .collect(),
        },
        Err(err) => HabitHistoryResponse {
            ok: false,
            days: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn week_list_response(op: &str, result: Result<Vec<Week>, String>) -> WeekListResponse {
    match result {
        Ok(weeks) => WeekListResponse {
            ok: true,
            message: format!("{} week(s).", weeks.len()),
            weeks: weeks.into_iter().map(to_week_item).collect(),
        },
        Err(err) => WeekListResponse {
            ok: false,
            weeks: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn reminder_list_response(op: &str, result: Result<Vec<Reminder>, String>) -> ReminderListResponse {
    match result {
        Ok(reminders) => ReminderListResponse {
            ok: true,
            message: format!("{} reminder(s).", reminders.len()),
            reminders: reminders.into_iter().map(to_reminder_item).collect(),
        },
        Err(err) => ReminderListResponse {
            ok: false,
            reminders: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn reminder_switch_response(
    op: &str,
    result: Result<(Vec<Reminder>, Vec<String>), String>,
) -> ReminderSwitchResponse {
    match result {
        Ok((reminders, cancelled_notification_ids)) => ReminderSwitchResponse {
            ok: true,
            message: format!(
                "{} reminder(s), {} trigger(s) to cancel.",
                reminders.len(),
                cancelled_notification_ids.len()
            ),
            reminders: reminders.into_iter().map(to_reminder_item).collect(),
            cancelled_notification_ids,
        },
        Err(err) => ReminderSwitchResponse {
            ok: false,
            reminders: Vec::new(),
            cancelled_notification_ids: Vec::new(),
            message: format!("{op} failed: {err}"),
        },
    }
}

fn to_habit_item(habit: Habit) -> HabitItem {
    HabitItem {
        id: habit.id,
        label: habit.label,
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        days: task.days,
        desc: task.desc,
        resource: task.resource,
        completed: task.completed,
        completed_date: task.completed_date.map(date_key),
    }
}

fn to_week_item(week: Week) -> WeekItem {
    WeekItem {
        week: week.week,
        title: week.title,
        tasks: week.tasks.into_iter().map(to_task_item).collect(),
    }
}

fn to_reminder_item(reminder: Reminder) -> ReminderItem {
    ReminderItem {
        id: reminder.id,
        message: reminder.message,
        date: date_key(reminder.date),
        time: reminder.time.to_string(),
        notification_id: reminder.notification_id,
        is_active: reminder.is_active,
        is_alarm: reminder.is_alarm,
    }
}
