use chrono::Utc;
use goaltrack_core::model::{AdherenceConfig, Direction, NumericConfig};
use goaltrack_core::progress::dates::parse_day;
use goaltrack_core::{
    open_data_dir, CollectionStore, EntryService, Entry, EntryValue, FixedClock, Goal, GoalConfig,
    GoalService, JsonFileStore, RecordRepository, StoreError, Tag,
};
use std::sync::Barrier;
use std::thread;
use serde_json::{json, Value};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock::on(parse_day("2026-10-19").unwrap())
}

fn weight_goal() -> Goal {
    Goal::new(
        "weight",
        GoalConfig::Numeric(NumericConfig {
            unit: "kg".to_string(),
            target: Some(70.0),
            start_value: Some(82.0),
            direction: Direction::Decrease,
            target_rate: Some(-0.5),
        }),
        Utc::now(),
    )
}

#[test]
fn records_survive_reopening_the_data_dir() {
    let dir = TempDir::new().unwrap();
    let goal_id = {
        let store = open_data_dir(dir.path()).unwrap();
        let goals = GoalService::from_store(&store, clock());
        let entries = EntryService::from_store(&store, clock());
        let goal = goals.create_goal(weight_goal()).unwrap();
        entries.record_today(&goal.id, 81.2).unwrap();
        goal.id
    };

    let store = open_data_dir(dir.path()).unwrap();
    let goals = GoalService::from_store(&store, clock());
    let progress = goals.progress(&goal_id, None).unwrap();
    assert_eq!(progress.entry_count, 1);
    assert_eq!(progress.status_line, "81.2 kg");
}

#[test]
fn goal_file_uses_collection_key_and_camel_case() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let goal = GoalService::from_store(&store, clock())
        .create_goal(weight_goal())
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join("goals.json")).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    let stored = &value["goals"][0];
    assert_eq!(stored["id"], goal.id.as_str());
    assert_eq!(stored["type"], "numeric");
    assert_eq!(stored["config"]["type"], "numeric");
    assert_eq!(stored["config"]["startValue"], 82.0);
    assert_eq!(stored["config"]["targetRate"], -0.5);
    assert!(stored["createdAt"].is_string());
    assert_eq!(stored["milestones"], json!([]));
}

#[test]
fn handwritten_files_load_and_mismatched_goals_are_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("entries.json"),
        json!({
            "entries": [
                {"id": "e1", "goalId": "g1", "date": "2026-10-19",
                 "timestamp": "2026-10-19T08:00:00Z", "value": true},
                {"goalId": "g2", "date": "2026-10-18",
                 "timestamp": "2026-10-18T08:00:00.000Z", "value": 12.5, "note": "felt good"}
            ]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("goals.json"),
        json!({
            "goals": [{
                "id": "g1", "name": "floss", "type": "numeric",
                "createdAt": "2026-10-01T00:00:00Z",
                "config": {"type": "adherence"}, "milestones": []
            }]
        })
        .to_string(),
    )
    .unwrap();

    let store = open_data_dir(dir.path()).unwrap();
    let entries: Vec<Entry> = store.load().unwrap();
    assert_eq!(entries[0].value, EntryValue::Flag(true));
    assert_eq!(entries[1].value, EntryValue::Number(12.5));
    assert!(!entries[1].id.is_empty());
    assert_eq!(entries[1].note.as_deref(), Some("felt good"));

    let goals: Result<Vec<Goal>, StoreError> = store.load();
    assert!(matches!(goals, Err(StoreError::Json { .. })));
}

#[test]
fn adherence_toggle_persists_between_services() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let goal = GoalService::from_store(&store, clock())
        .create_goal(Goal::new(
            "stretch",
            GoalConfig::Adherence(AdherenceConfig::default()),
            Utc::now(),
        ))
        .unwrap();

    EntryService::from_store(&store, clock())
        .toggle_adherence_today(&goal.id)
        .unwrap();
    let progress = GoalService::from_store(&store, clock())
        .progress(&goal.id, None)
        .unwrap();
    assert_eq!(progress.status_line, "Done today");
    assert_eq!(progress.adherence.map(|stats| stats.streak), Some(1));
}

#[test]
fn first_reads_race_writes_without_losing_records() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("fresh"));

    let threads = 12;
    let barrier = Barrier::new(threads);
    thread::scope(|scope| {
        for index in 0..threads {
            let store = store.clone();
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                if index % 2 == 0 {
                    let _: Vec<Tag> = store.load().unwrap();
                } else {
                    RecordRepository::new(store)
                        .create(Tag::new(&format!("tag-{index}"), "#3b82f6"))
                        .unwrap();
                }
            });
        }
    });

    let stored: Vec<Tag> = store.load().unwrap();
    assert_eq!(stored.len(), threads / 2);
    assert!(!store.dir().join("tags.json.tmp").exists());
}
