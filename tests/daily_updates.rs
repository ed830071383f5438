use std::collections::HashSet;
use tempfile::TempDir;
use tup::models::{DailyUpdateDraft, Mood};
use tup::{DailyUpdateStore, Storage};

fn open_store() -> (TempDir, DailyUpdateStore) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path()).unwrap();
    (dir, DailyUpdateStore::load(storage))
}

fn entry(date: &str, content: &str) -> DailyUpdateDraft {
    DailyUpdateDraft {
        date: date.to_string(),
        task_id: None,
        content: content.to_string(),
        mood: Mood::Good,
        learnings: String::new(),
        tomorrow: String::new(),
    }
}

#[test]
fn add_assigns_unique_ids() {
    let (_dir, mut store) = open_store();

    store.add(entry("2026-08-01", "first"));
    store.add(entry("2026-08-02", "second"));
    store.add(entry("2026-08-03", "third"));

    let ids: HashSet<&str> = store.updates().iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn today_entry_is_none_without_a_matching_date() {
    let (_dir, mut store) = open_store();

    assert!(store.today_entry().is_none());

    store.add(entry("2000-01-01", "long ago"));
    assert!(store.today_entry().is_none());
}

#[test]
fn today_entry_finds_the_entry_dated_today() {
    let (_dir, mut store) = open_store();

    store.add(entry("2000-01-01", "long ago"));
    store.add(entry(&tup::utils::today_string(), "written today"));

    let today = store.today_entry().unwrap();
    assert_eq!(today.content, "written today");
}

#[test]
fn store_permits_two_entries_on_the_same_date() {
    // Date uniqueness is a caller convention, not a store rule
    let (_dir, mut store) = open_store();

    store.add(entry("2026-08-05", "morning"));
    store.add(entry("2026-08-05", "evening"));

    assert_eq!(store.updates().len(), 2);
}

#[test]
fn today_entry_returns_the_first_in_store_order_on_duplicates() {
    let (_dir, mut store) = open_store();

    let today = tup::utils::today_string();
    store.add(entry(&today, "first write"));
    store.add(entry(&today, "second write"));

    assert_eq!(store.today_entry().unwrap().content, "first write");
}

#[test]
fn delete_removes_the_matching_entry() {
    let (_dir, mut store) = open_store();

    let id = store.add(entry("2026-08-01", "doomed")).id.clone();
    store.add(entry("2026-08-02", "survivor"));

    store.delete(&id);

    assert_eq!(store.updates().len(), 1);
    assert_eq!(store.updates()[0].content, "survivor");
}

#[test]
fn delete_with_unknown_id_leaves_state_unchanged() {
    let (_dir, mut store) = open_store();

    store.add(entry("2026-08-01", "keeper"));
    let before = store.updates().to_vec();

    store.delete("no-such-id");

    assert_eq!(store.updates(), before.as_slice());
}
