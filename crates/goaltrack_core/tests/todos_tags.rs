use goaltrack_core::progress::dates::parse_day;
use goaltrack_core::{
    open_data_dir, CollectionStore, FixedClock, RecordRepository, Tag, TagService, TagServiceError, Todo,
    TodoService,
};
use std::sync::Barrier;
use std::thread;
use tempfile::TempDir;

#[test]
fn todo_order_survives_reorder_and_reload() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let clock = FixedClock::on(parse_day("2026-10-19").unwrap());
    let service = TodoService::new(RecordRepository::new(store.clone()), clock);

    let ids: Vec<String> = ["water plants", "call mom", "pay rent"]
        .into_iter()
        .map(|text| service.add_today(text).unwrap().id)
        .collect();
    service
        .reorder(&[ids[2].clone(), ids[0].clone()])
        .unwrap();

    let reopened = TodoService::new(RecordRepository::new(open_data_dir(dir.path()).unwrap()), clock);
    let todos: Vec<Todo> = reopened.list_for_date(clock_today()).unwrap();
    let texts: Vec<&str> = todos.iter().map(|todo| todo.text.as_str()).collect();
    assert_eq!(texts, vec!["pay rent", "water plants", "call mom"]);
    assert_eq!(reopened.dates_desc().unwrap(), vec![clock_today()]);
}

#[test]
fn tag_names_are_unique_case_insensitively_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let service = TagService::new(RecordRepository::new(store));

    service.create_tag(Tag::new("Errands", "")).unwrap();
    let err = service.create_tag(Tag::new("ERRANDS", "#ef4444")).unwrap_err();
    assert!(matches!(err, TagServiceError::DuplicateName(_)));
    assert_eq!(err.to_string(), "tag already exists: errands");

    let raw = std::fs::read_to_string(dir.path().join("tags.json")).unwrap();
    assert!(raw.contains("\"name\": \"errands\""));
    assert!(raw.contains("\"color\": \"#"));
}

#[test]
fn concurrent_tag_creates_keep_names_unique() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let seeded: Vec<Tag> = (0..500).map(|index| Tag::new(&format!("seed-{index}"), "#22c55e")).collect();
    CollectionStore::<Tag>::save(&store, &seeded).unwrap();

    let threads = 16;
    let barrier = Barrier::new(threads);
    let outcomes: Vec<Result<Tag, TagServiceError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let service = TagService::new(RecordRepository::new(store.clone()));
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    service.create_tag(Tag::new("Work", ""))
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter_map(|outcome| outcome.as_ref().err())
        .all(|err| matches!(err, TagServiceError::DuplicateName(_))));

    let stored: Vec<Tag> = CollectionStore::<Tag>::load(&store).unwrap();
    assert_eq!(stored.len(), 501);
    assert_eq!(stored.iter().filter(|tag| tag.name == "work").count(), 1);
}

#[test]
fn concurrent_todo_creates_get_distinct_orders() {
    let dir = TempDir::new().unwrap();
    let store = open_data_dir(dir.path()).unwrap();
    let clock = FixedClock::on(clock_today());

    let threads = 8;
    let barrier = Barrier::new(threads);
    let mut orders: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|index| {
                let service = TodoService::new(RecordRepository::new(store.clone()), clock);
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    service.add_today(format!("chore {index}")).unwrap().order.unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    orders.sort_unstable();
    assert_eq!(orders, (0..8).collect::<Vec<u32>>());
}

fn clock_today() -> chrono::NaiveDate {
    parse_day("2026-10-19").unwrap()
}
