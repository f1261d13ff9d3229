mod common;

use chrono::NaiveDate;
use common::RecordingScheduler;
use monthlytodo_core::model::reminder::{DEFAULT_EVENING_REMINDER_ID, DEFAULT_MORNING_REMINDER_ID};
use monthlytodo_core::notify::REMINDER_NOTIFICATION_TITLE;
use monthlytodo_core::{
    DocumentStore, FixedClock, MemoryDocumentStore, NullScheduler, Reminder, ReminderDraft,
    ReminderPatch, ReminderService, ReminderSettings, ReminderTime, StorageKey,
};

const NOW_MILLIS: i64 = 1_710_000_000_000;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(today(), NOW_MILLIS)
}

fn time(value: &str) -> ReminderTime {
    value.parse().unwrap()
}

fn draft(message: &str, at: &str) -> ReminderDraft {
    ReminderDraft::new(message, today(), time(at))
}

#[test]
fn reminder_time_parses_and_formats_hh_mm() {
    assert_eq!(time("7:05").to_string(), "07:05");
    assert_eq!(time("23:59").hour(), 23);
    assert!("24:00".parse::<ReminderTime>().is_err());
    assert!("7-30".parse::<ReminderTime>().is_err());
    assert!("07:5x".parse::<ReminderTime>().is_err());
}

#[test]
fn reminders_default_to_empty_and_settings_to_default_mode() {
    let store = MemoryDocumentStore::new();
    let service = ReminderService::new(&store, NullScheduler, clock());

    assert!(service.get_reminders().is_empty());
    assert_eq!(service.get_reminder_settings(), ReminderSettings::default());
    assert!(service.get_reminder_settings().use_default);
}

#[test]
fn default_reminders_are_built_for_today_without_persisting() {
    let store = MemoryDocumentStore::new();
    let service = ReminderService::new(&store, NullScheduler, clock());

    let defaults = service.default_reminders();
    assert_eq!(defaults.len(), 2);
    assert_eq!(defaults[0].id, DEFAULT_MORNING_REMINDER_ID);
    assert_eq!(defaults[0].time.to_string(), "06:00");
    assert_eq!(defaults[1].id, DEFAULT_EVENING_REMINDER_ID);
    assert_eq!(defaults[1].time.to_string(), "22:00");
    assert!(defaults.iter().all(|r| r.is_active && r.date == today()));
    assert!(store.is_empty());
}

#[test]
fn add_update_delete_reminder_records() {
    let store = MemoryDocumentStore::new();
    let service = ReminderService::new(&store, NullScheduler, clock());

    let reminders = service.add_reminder(draft("Stretch", "08:30")).unwrap();
    assert_eq!(reminders.len(), 1);
    let id = reminders[0].id.clone();
    assert_eq!(id, format!("reminder_{NOW_MILLIS}"));
    assert_eq!(reminders[0].notification_id, None);

    let reminders = service
        .update_reminder(
            &id,
            ReminderPatch {
                message: Some("Stretch well".to_string()),
                ..ReminderPatch::default()
            },
        )
        .unwrap();
    assert_eq!(reminders[0].message, "Stretch well");
    assert_eq!(reminders[0].time, time("08:30"));

    let unchanged = service
        .update_reminder("missing", ReminderPatch::default())
        .unwrap();
    assert_eq!(unchanged, reminders);

    assert!(service.delete_reminder(&id).unwrap().is_empty());
    assert!(service.get_reminders().is_empty());
}

#[test]
fn create_active_reminder_schedules_with_matching_payload() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let reminders = service.create_reminder(draft("Drink water", "10:15")).unwrap();
    let created = &reminders[0];
    assert_eq!(created.notification_id.as_deref(), Some("n1"));

    let scheduled = scheduler.scheduled.borrow();
    let (_, at, payload) = &scheduled[0];
    assert_eq!(*at, time("10:15"));
    assert_eq!(payload.title, REMINDER_NOTIFICATION_TITLE);
    assert_eq!(payload.body, "Drink water");
    assert_eq!(payload.reminder_id, created.id);
}

#[test]
fn create_inactive_reminder_is_not_scheduled() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let mut inactive = draft("Later", "18:00");
    inactive.is_active = false;
    let reminders = service.create_reminder(inactive).unwrap();

    assert_eq!(reminders[0].notification_id, None);
    assert!(scheduler.scheduled_handles().is_empty());
}

#[test]
fn scheduling_failure_still_saves_reminder_without_handle() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    scheduler.failing.set(true);
    let service = ReminderService::new(&store, &scheduler, clock());

    let reminders = service.create_reminder(draft("Walk", "12:00")).unwrap();
    assert_eq!(reminders.len(), 1);
    assert!(reminders[0].is_active);
    assert_eq!(reminders[0].notification_id, None);
    assert_eq!(store.get::<Vec<Reminder>>(StorageKey::Reminders).unwrap().unwrap().len(), 1);
}

#[test]
fn edit_reminder_cancels_old_trigger_and_reschedules() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let id = service.create_reminder(draft("Read", "21:00")).unwrap()[0]
        .id
        .clone();
    let reminders = service.edit_reminder(&id, draft("Read more", "21:30")).unwrap();

    assert_eq!(scheduler.cancelled_handles(), vec!["n1".to_string()]);
    assert_eq!(reminders[0].message, "Read more");
    assert_eq!(reminders[0].time, time("21:30"));
    assert_eq!(reminders[0].notification_id.as_deref(), Some("n2"));
}

#[test]
fn deactivating_cancels_and_clears_handle_then_reactivating_schedules() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let id = service.create_reminder(draft("Meditate", "07:00")).unwrap()[0]
        .id
        .clone();

    let reminders = service.toggle_reminder_active(&id).unwrap();
    assert!(!reminders[0].is_active);
    assert_eq!(reminders[0].notification_id, None);
    assert_eq!(scheduler.cancelled_handles(), vec!["n1".to_string()]);

    let reminders = service.toggle_reminder_active(&id).unwrap();
    assert!(reminders[0].is_active);
    assert_eq!(reminders[0].notification_id.as_deref(), Some("n2"));
}

#[test]
fn remove_reminder_cancels_its_trigger() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let id = service.create_reminder(draft("Journal", "22:30")).unwrap()[0]
        .id
        .clone();
    let reminders = service.remove_reminder(&id).unwrap();

    assert!(reminders.is_empty());
    assert_eq!(scheduler.cancelled_handles(), vec!["n1".to_string()]);
}

#[test]
fn custom_mode_mirrors_reminders_into_settings() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    service.set_reminder_mode(false).unwrap();
    let reminders = service.create_reminder(draft("Plan tomorrow", "20:00")).unwrap();

    let settings = service.get_reminder_settings();
    assert!(!settings.use_default);
    assert_eq!(settings.custom_reminders, reminders);
}

#[test]
fn switching_modes_swaps_reminder_sets() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let defaults = service.set_reminder_mode(true).unwrap();
    assert_eq!(defaults.len(), 2);
    assert!(defaults.iter().all(|r| r.notification_id.is_some()));

    let custom = service.set_reminder_mode(false).unwrap();
    assert!(custom.is_empty());
    let mut cancelled = scheduler.cancelled_handles();
    cancelled.sort();
    assert_eq!(cancelled, vec!["n1".to_string(), "n2".to_string()]);

    service.create_reminder(draft("Custom one", "09:00")).unwrap();
    let back_to_default = service.set_reminder_mode(true).unwrap();
    assert_eq!(back_to_default[0].id, DEFAULT_MORNING_REMINDER_ID);
    assert_eq!(service.get_reminder_settings().custom_reminders.len(), 1);

    let custom_again = service.set_reminder_mode(false).unwrap();
    assert_eq!(custom_again.len(), 1);
    assert_eq!(custom_again[0].message, "Custom one");
    assert!(custom_again[0].notification_id.is_some());
}

#[test]
fn ensure_default_reminders_seeds_once_when_permitted() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());

    let seeded = service.ensure_default_reminders().unwrap();
    assert_eq!(seeded.len(), 2);
    assert_eq!(scheduler.scheduled_handles().len(), 2);

    let again = service.ensure_default_reminders().unwrap();
    assert_eq!(again, seeded);
    assert_eq!(scheduler.scheduled_handles().len(), 2);
}

#[test]
fn ensure_default_reminders_without_permission_does_nothing() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    scheduler.denied.set(true);
    let service = ReminderService::new(&store, &scheduler, clock());

    assert!(service.ensure_default_reminders().unwrap().is_empty());
    assert!(scheduler.scheduled_handles().is_empty());
    assert_eq!(store.get_raw(StorageKey::Reminders).unwrap(), None);
}

#[test]
fn reminder_json_uses_camel_case_fields() {
    let store = MemoryDocumentStore::new();
    let scheduler = RecordingScheduler::new();
    let service = ReminderService::new(&store, &scheduler, clock());
    service.create_reminder(draft("Wire check", "06:05")).unwrap();

    let raw = store.get_raw(StorageKey::Reminders).unwrap().unwrap();
    assert!(raw.contains("\"notificationId\":\"n1\""));
    assert!(raw.contains("\"isActive\":true"));
    assert!(raw.contains("\"time\":\"06:05\""));
    assert!(raw.contains("\"date\":\"2024-03-09\""));
}

#[test]
fn host_scheduled_handles_are_listed_before_a_mode_switch_drops_them() {
    let store = MemoryDocumentStore::new();
    let service = ReminderService::new(&store, NullScheduler, clock());

    let mut hosted = draft("Scheduled by host", "09:15");
    hosted.notification_id = Some("host-1".to_string());
    service.add_reminder(hosted).unwrap();
    assert_eq!(service.live_notification_ids(), vec!["host-1".to_string()]);

    let reminders = service.set_reminder_mode(true).unwrap();
    assert_eq!(reminders.len(), 2);
    assert!(reminders.iter().all(|r| r.notification_id.is_none()));
    assert!(service.live_notification_ids().is_empty());
}
