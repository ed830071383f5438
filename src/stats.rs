use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Category, DailyUpdate, Mood, Priority, Status, Task};
use crate::utils;

/// Derived weekly figures, recomputed from scratch on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub this_week_completed: usize,
    pub completion_rate: u32,
}

/// Task count for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub category: Category,
    pub count: usize,
}

/// Completed/total figures for one priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrioritySlice {
    pub priority: Priority,
    pub completed: usize,
    pub total: usize,
}

/// Occurrence count for one mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodSlice {
    pub mood: Mood,
    pub count: usize,
}

/// Weekly stats relative to the current instant
pub fn weekly_stats(tasks: &[Task]) -> WeeklyStats {
    weekly_stats_at(tasks, Utc::now())
}

/// Weekly stats relative to an explicit instant (the trailing-7-day window ends at `now`)
pub fn weekly_stats_at(tasks: &[Task], now: DateTime<Utc>) -> WeeklyStats {
    let week_ago = now - Duration::days(7);
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.status == Status::Done).collect();
    let this_week = completed
        .iter()
        .filter(|t| {
            // Judged by completion instant, falling back to creation; unparseable
            // timestamps fall outside the window
            let stamp = t.completed_at.as_deref().unwrap_or(&t.created_at);
            utils::parse_rfc3339(stamp).is_some_and(|at| at >= week_ago)
        })
        .count();

    let completion_rate = if tasks.is_empty() {
        0
    } else {
        ((completed.len() as f64 / tasks.len() as f64) * 100.0).round() as u32
    };

    WeeklyStats {
        total_tasks: tasks.len(),
        completed_tasks: completed.len(),
        this_week_completed: this_week,
        completion_rate,
    }
}

/// Task counts per category, in fixed category order
pub fn count_by_category(tasks: &[Task]) -> Vec<CategorySlice> {
    Category::ALL
        .iter()
        .map(|&category| CategorySlice {
            category,
            count: tasks.iter().filter(|t| t.category == category).count(),
        })
        .collect()
}

/// Completed/total counts per priority, high to low
pub fn completion_by_priority(tasks: &[Task]) -> Vec<PrioritySlice> {
    Priority::ALL
        .iter()
        .map(|&priority| {
            let total = tasks.iter().filter(|t| t.priority == priority).count();
            let completed = tasks
                .iter()
                .filter(|t| t.priority == priority && t.status == Status::Done)
                .count();
            PrioritySlice {
                priority,
                completed,
                total,
            }
        })
        .collect()
}

/// Mood occurrence counts, only moods that appear, in first-seen order
pub fn mood_distribution(updates: &[DailyUpdate]) -> Vec<MoodSlice> {
    let mut slices: Vec<MoodSlice> = Vec::new();
    for update in updates {
        match slices.iter_mut().find(|s| s.mood == update.mood) {
            Some(slice) => slice.count += 1,
            None => slices.push(MoodSlice {
                mood: update.mood,
                count: 1,
            }),
        }
    }
    slices
}

/// The update streak figure: the number of daily updates recorded
pub fn update_streak(updates: &[DailyUpdate]) -> usize {
    updates.len()
}

/// The newest non-done tasks by creation instant
pub fn recent_open_tasks<'a>(tasks: &'a [Task], limit: usize) -> Vec<&'a Task> {
    let mut open: Vec<&Task> = tasks.iter().filter(|t| t.status != Status::Done).collect();
    open.sort_by(|a, b| {
        let a_created = utils::parse_rfc3339(&a.created_at);
        let b_created = utils::parse_rfc3339(&b.created_at);
        b_created.cmp(&a_created)
    });
    open.truncate(limit);
    open
}

/// Non-done tasks with a due date, soonest first
pub fn upcoming_due_tasks<'a>(tasks: &'a [Task], limit: usize) -> Vec<&'a Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date.is_some() && t.status != Status::Done)
        .collect();
    due.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    due.truncate(limit);
    due
}
