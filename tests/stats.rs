use chrono::{TimeZone, Utc};
use tup::achievements;
use tup::models::{Category, DailyUpdate, Mood, Priority, Status, Task};
use tup::stats;

fn task(id: &str, status: Status, created_at: &str, completed_at: Option<&str>) -> Task {
    Task {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        category: Category::Work,
        priority: Priority::Medium,
        status,
        due_date: None,
        created_at: created_at.to_string(),
        completed_at: completed_at.map(|s| s.to_string()),
        tags: vec![],
    }
}

fn update(id: &str, date: &str, mood: Mood) -> DailyUpdate {
    DailyUpdate {
        id: id.to_string(),
        date: date.to_string(),
        task_id: None,
        content: "entry".to_string(),
        mood,
        learnings: String::new(),
        tomorrow: String::new(),
    }
}

#[test]
fn weekly_stats_on_an_empty_store_is_all_zeroes() {
    let stats = stats::weekly_stats(&[]);
    assert_eq!(stats.total_tasks, 0);
    assert_eq!(stats.completed_tasks, 0);
    assert_eq!(stats.this_week_completed, 0);
    assert_eq!(stats.completion_rate, 0);
}

#[test]
fn completion_rate_is_a_rounded_percentage() {
    let tasks = vec![
        task("a", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
        task("b", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("c", Status::InProgress, "2026-08-01T10:00:00+00:00", None),
    ];

    let stats = stats::weekly_stats(&tasks);
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.completion_rate, 33);
}

#[test]
fn this_week_counts_completions_in_the_trailing_seven_days() {
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
    let tasks = vec![
        // Completed three days before now: inside the window
        task("recent", Status::Done, "2026-07-01T09:00:00+00:00", Some("2026-08-03T09:00:00+00:00")),
        // Completed ten days before now: outside
        task("old", Status::Done, "2026-07-01T09:00:00+00:00", Some("2026-07-27T09:00:00+00:00")),
        // Done without a completion stamp: judged by creation instant
        task("stampless", Status::Done, "2026-08-05T09:00:00+00:00", None),
        // Open tasks never count toward the week
        task("open", Status::Todo, "2026-08-05T09:00:00+00:00", None),
    ];

    let stats = stats::weekly_stats_at(&tasks, now);
    assert_eq!(stats.completed_tasks, 3);
    assert_eq!(stats.this_week_completed, 2);
}

#[test]
fn unparseable_timestamps_fall_outside_the_week_window() {
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
    let tasks = vec![task("broken", Status::Done, "not a timestamp", None)];

    let stats = stats::weekly_stats_at(&tasks, now);
    assert_eq!(stats.completed_tasks, 1);
    assert_eq!(stats.this_week_completed, 0);
}

#[test]
fn category_counts_cover_every_category_in_fixed_order() {
    let mut tasks = vec![
        task("a", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("b", Status::Todo, "2026-08-01T10:00:00+00:00", None),
    ];
    tasks[1].category = Category::Health;

    let slices = stats::count_by_category(&tasks);
    let as_pairs: Vec<(Category, usize)> = slices.iter().map(|s| (s.category, s.count)).collect();
    assert_eq!(
        as_pairs,
        vec![
            (Category::Work, 1),
            (Category::Personal, 0),
            (Category::Learning, 0),
            (Category::Health, 1),
        ]
    );
}

#[test]
fn priority_completion_pairs_completed_with_total() {
    let mut tasks = vec![
        task("a", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
        task("b", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("c", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
    ];
    tasks[0].priority = Priority::High;
    tasks[1].priority = Priority::High;
    tasks[2].priority = Priority::Low;

    let slices = stats::completion_by_priority(&tasks);
    assert_eq!(slices[0].priority, Priority::High);
    assert_eq!((slices[0].completed, slices[0].total), (1, 2));
    assert_eq!(slices[1].priority, Priority::Medium);
    assert_eq!((slices[1].completed, slices[1].total), (0, 0));
    assert_eq!(slices[2].priority, Priority::Low);
    assert_eq!((slices[2].completed, slices[2].total), (1, 1));
}

#[test]
fn mood_distribution_counts_only_moods_that_occur() {
    let updates = vec![
        update("1", "2026-08-01", Mood::Good),
        update("2", "2026-08-02", Mood::Great),
        update("3", "2026-08-03", Mood::Good),
    ];

    let slices = stats::mood_distribution(&updates);
    assert_eq!(slices.len(), 2);
    assert_eq!((slices[0].mood, slices[0].count), (Mood::Good, 2));
    assert_eq!((slices[1].mood, slices[1].count), (Mood::Great, 1));
}

#[test]
fn update_streak_is_the_number_of_entries() {
    let updates = vec![
        update("1", "2026-08-01", Mood::Okay),
        update("2", "2026-08-02", Mood::Okay),
    ];
    assert_eq!(stats::update_streak(&updates), 2);
    assert_eq!(stats::update_streak(&[]), 0);
}

#[test]
fn recent_open_tasks_are_newest_first_and_skip_done() {
    let tasks = vec![
        task("oldest", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("done", Status::Done, "2026-08-04T10:00:00+00:00", Some("2026-08-05T10:00:00+00:00")),
        task("newest", Status::InProgress, "2026-08-03T10:00:00+00:00", None),
    ];

    let recent = stats::recent_open_tasks(&tasks, 2);
    let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["newest", "oldest"]);
}

#[test]
fn upcoming_due_tasks_are_soonest_first() {
    let mut tasks = vec![
        task("later", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("soon", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("no-due", Status::Todo, "2026-08-01T10:00:00+00:00", None),
    ];
    tasks[0].due_date = Some("2026-09-15".to_string());
    tasks[1].due_date = Some("2026-08-10".to_string());

    let upcoming = stats::upcoming_due_tasks(&tasks, 5);
    let ids: Vec<&str> = upcoming.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["soon", "later"]);
}

#[test]
fn achievements_are_locked_on_an_empty_history() {
    let all = achievements::evaluate(&[], &[]);
    assert_eq!(all.len(), 6);
    assert!(all.iter().all(|a| !a.unlocked));
    assert!(all.iter().all(|a| a.progress == 0));
}

#[test]
fn first_completed_task_unlocks_getting_started() {
    let tasks = vec![task(
        "a",
        Status::Done,
        "2026-08-01T10:00:00+00:00",
        Some("2026-08-02T10:00:00+00:00"),
    )];

    let all = achievements::evaluate(&tasks, &[]);
    let first = all.iter().find(|a| a.id == "first-task").unwrap();
    assert!(first.unlocked);
    assert_eq!((first.progress, first.max), (1, 1));

    let master = all.iter().find(|a| a.id == "task-master").unwrap();
    assert!(!master.unlocked);
    assert_eq!((master.progress, master.max), (1, 10));
}

#[test]
fn task_master_unlocks_at_exactly_ten_completions() {
    let tasks: Vec<Task> = (0..10)
        .map(|i| {
            task(
                &format!("t{}", i),
                Status::Done,
                "2026-08-01T10:00:00+00:00",
                Some("2026-08-02T10:00:00+00:00"),
            )
        })
        .collect();

    let all = achievements::evaluate(&tasks, &[]);
    let master = all.iter().find(|a| a.id == "task-master").unwrap();
    assert!(master.unlocked);
    assert_eq!(master.progress, 10);
}

#[test]
fn seven_updates_unlock_daily_warrior() {
    let updates: Vec<DailyUpdate> = (1..=7)
        .map(|day| update(&format!("u{}", day), &format!("2026-08-{:02}", day), Mood::Good))
        .collect();

    let all = achievements::evaluate(&[], &updates);
    let warrior = all.iter().find(|a| a.id == "daily-warrior").unwrap();
    assert!(warrior.unlocked);

    let king = all.iter().find(|a| a.id == "consistency-king").unwrap();
    assert!(!king.unlocked);
    assert_eq!(king.progress, 7);
}

#[test]
fn perfectionist_requires_every_task_done_and_at_least_one() {
    let done = vec![
        task("a", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
        task("b", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
    ];
    let all = achievements::evaluate(&done, &[]);
    let perfect = all.iter().find(|a| a.id == "perfectionist").unwrap();
    assert!(perfect.unlocked);
    assert_eq!(perfect.progress, 100);

    let mixed = vec![
        task("a", Status::Done, "2026-08-01T10:00:00+00:00", Some("2026-08-02T10:00:00+00:00")),
        task("b", Status::Todo, "2026-08-01T10:00:00+00:00", None),
        task("c", Status::Todo, "2026-08-01T10:00:00+00:00", None),
    ];
    let all = achievements::evaluate(&mixed, &[]);
    let perfect = all.iter().find(|a| a.id == "perfectionist").unwrap();
    assert!(!perfect.unlocked);
    assert_eq!(perfect.progress, 33);
}
