use chrono::NaiveDate;
use monthlytodo_core::report::progress::{calculate_progress, week_progress};
use monthlytodo_core::{
    default_weeks, DocumentStore, FixedClock, MemoryDocumentStore, NewTask, StorageKey,
    TaskPatch, TaskService, TaskServiceError, Week,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(day(10), 1_707_523_200_000)
}

#[test]
fn first_read_seeds_default_plan() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    assert_eq!(service.get_weeks(), default_weeks());
    assert_eq!(
        store.get::<Vec<Week>>(StorageKey::Weeks).unwrap(),
        Some(default_weeks())
    );
}

#[test]
fn toggle_stamps_and_clears_completion_date() {
    let store = MemoryDocumentStore::new();
    let clock = clock();
    let service = TaskService::new(&store, &clock);

    let weeks = service.toggle_task_complete(0, "t2").unwrap();
    let task = weeks[0].find_task("t2").unwrap();
    assert!(task.completed);
    assert_eq!(task.completed_date, Some(day(10)));

    clock.set_today(day(11));
    let weeks = service.toggle_task_complete(0, "t2").unwrap();
    let task = weeks[0].find_task("t2").unwrap();
    assert!(!task.completed);
    assert_eq!(task.completed_date, None);
}

#[test]
fn toggle_with_invalid_week_index_fails() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let err = service.toggle_task_complete(7, "t1").unwrap_err();
    assert!(matches!(err, TaskServiceError::WeekNotFound(7)));
    assert_eq!(service.get_weeks(), default_weeks());
}

#[test]
fn toggle_unknown_task_in_valid_week_is_a_no_op() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let weeks = service.toggle_task_complete(1, "t1").unwrap();
    assert_eq!(weeks, default_weeks());
}

#[test]
fn add_task_defaults_day_label_and_starts_incomplete() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let weeks = service.add_task(3, NewTask::new("Write retrospective")).unwrap();
    let added = weeks[3].tasks.last().unwrap();
    assert_eq!(weeks[3].tasks.len(), 4);
    assert_eq!(added.id, "t1707523200000");
    assert_eq!(added.days, "Day 4");
    assert_eq!(added.desc, "Write retrospective");
    assert!(!added.completed);
    assert_eq!(added.completed_date, None);
}

#[test]
fn add_task_keeps_explicit_fields_and_ignores_bad_week() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let new_task = NewTask {
        days: Some("Days 5-6".to_string()),
        desc: "Read chapter".to_string(),
        resource: Some("https://example.org/book".to_string()),
    };
    let weeks = service.add_task(0, new_task.clone()).unwrap();
    let added = weeks[0].tasks.last().unwrap();
    assert_eq!(added.days, "Days 5-6");
    assert_eq!(added.resource.as_deref(), Some("https://example.org/book"));

    let unchanged = service.add_task(9, new_task).unwrap();
    assert_eq!(unchanged, weeks);
}

#[test]
fn update_task_merges_fields_literally() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let weeks = service
        .update_task(
            1,
            "t4",
            TaskPatch {
                desc: Some("Review the tracker".to_string()),
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let task = weeks[1].find_task("t4").unwrap();
    assert_eq!(task.desc, "Review the tracker");
    assert_eq!(task.days, "Days 11-14");
    assert!(task.completed);
    assert_eq!(task.completed_date, None);
}

#[test]
fn delete_task_and_rename_week() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    let weeks = service.delete_task(3, "t8").unwrap();
    assert_eq!(weeks[3].tasks.len(), 2);
    assert!(weeks[3].find_task("t8").is_none());

    let unchanged = service.delete_task(3, "t8").unwrap();
    assert_eq!(unchanged, weeks);

    let weeks = service.rename_week(2, "Deep work").unwrap();
    assert_eq!(weeks[2].title, "Deep work");
    assert_eq!(weeks[2].week, 3);
}

#[test]
fn progress_tracks_completed_tasks() {
    let store = MemoryDocumentStore::new();
    let service = TaskService::new(&store, clock());

    service.toggle_task_complete(0, "t1").unwrap();
    let weeks = service.toggle_task_complete(3, "t9").unwrap();

    let overall = calculate_progress(&weeks);
    assert_eq!((overall.completed, overall.total, overall.percent), (2, 9, 22));

    let first = week_progress(&weeks, 0);
    assert_eq!((first.completed, first.total, first.percent), (1, 2, 50));
    assert_eq!(week_progress(&weeks, 12).percent, 0);
    assert_eq!(calculate_progress(&[]).percent, 0);
}
