mod common;

use chrono::NaiveDate;
use common::RecordingScheduler;
use monthlytodo_core::db::open_db_in_memory;
use monthlytodo_core::{
    default_habits, default_weeks, DocumentStore, FixedClock, HabitService, MemoryDocumentStore,
    ReminderDraft, ReminderService, ResetService, SqliteDocumentStore, StorageKey, TaskService,
};

fn clock() -> FixedClock {
    FixedClock::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 1_717_200_000_000)
}

#[test]
fn reset_all_data_removes_every_key_and_reseeds_on_next_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let clock = clock();
    let scheduler = RecordingScheduler::new();

    let habits = HabitService::new(&store, &clock);
    let tasks = TaskService::new(&store, &clock);
    habits.add_habit("Cold shower").unwrap();
    habits.toggle_habit_for_today("habit_1", clock_today()).unwrap();
    tasks.toggle_task_complete(0, "t1").unwrap();
    ReminderService::new(&store, &scheduler, &clock)
        .set_reminder_mode(false)
        .unwrap();

    ResetService::new(&store, &scheduler, &clock)
        .reset_all_data()
        .unwrap();

    for key in StorageKey::ALL {
        assert_eq!(store.get_raw(key).unwrap(), None, "{key} should be cleared");
    }
    assert_eq!(habits.get_habits(), default_habits());
    assert!(habits.get_habit_history().is_empty());
    assert_eq!(tasks.get_weeks(), default_weeks());
}

#[test]
fn reset_and_restore_defaults_cancels_live_triggers_and_reschedules() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let clock = clock();
    let scheduler = RecordingScheduler::new();
    let reminders = ReminderService::new(&store, &scheduler, &clock);

    reminders
        .create_reminder(ReminderDraft::new(
            "Custom",
            clock_today(),
            "13:45".parse().unwrap(),
        ))
        .unwrap();

    let restored = ResetService::new(&store, &scheduler, &clock)
        .reset_and_restore_defaults()
        .unwrap();

    assert_eq!(scheduler.cancelled_handles(), vec!["n1".to_string()]);
    assert_eq!(restored.len(), 2);
    assert!(restored.iter().all(|r| r.notification_id.is_some()));
    assert_eq!(reminders.get_reminders(), restored);
    assert!(reminders.get_reminder_settings().use_default);
}

fn clock_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[test]
fn reset_and_restore_defaults_returns_to_default_mode_from_custom_mode() {
    let store = MemoryDocumentStore::new();
    let clock = clock();
    let scheduler = RecordingScheduler::new();
    let reminders = ReminderService::new(&store, &scheduler, &clock);
    reminders.set_reminder_mode(false).unwrap();
    assert!(!reminders.get_reminder_settings().use_default);

    let restored = ResetService::new(&store, &scheduler, &clock)
        .reset_and_restore_defaults()
        .unwrap();

    assert_eq!(restored.len(), 2);
    assert!(reminders.get_reminder_settings().use_default);
}
