use serde::Serialize;

use crate::models::{DailyUpdate, Status, Task};
use crate::stats;

/// One catalog entry with its unlock state and progress toward the threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    pub progress: u32,
    pub max: u32,
}

fn capped(value: usize, max: u32) -> u32 {
    (value as u32).min(max)
}

/// Evaluate the fixed achievement catalog against current store state
pub fn evaluate(tasks: &[Task], updates: &[DailyUpdate]) -> Vec<Achievement> {
    let completed = tasks.iter().filter(|t| t.status == Status::Done).count();
    let total = tasks.len();
    let streak = stats::update_streak(updates);
    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    vec![
        Achievement {
            id: "first-task",
            title: "Getting Started",
            description: "Complete your first task",
            unlocked: completed >= 1,
            progress: capped(completed, 1),
            max: 1,
        },
        Achievement {
            id: "task-master",
            title: "Task Master",
            description: "Complete 10 tasks",
            unlocked: completed >= 10,
            progress: capped(completed, 10),
            max: 10,
        },
        Achievement {
            id: "productivity-beast",
            title: "Productivity Beast",
            description: "Complete 50 tasks",
            unlocked: completed >= 50,
            progress: capped(completed, 50),
            max: 50,
        },
        Achievement {
            id: "daily-warrior",
            title: "Daily Warrior",
            description: "Write 7 daily updates",
            unlocked: streak >= 7,
            progress: capped(streak, 7),
            max: 7,
        },
        Achievement {
            id: "consistency-king",
            title: "Consistency King",
            description: "Write 30 daily updates",
            unlocked: streak >= 30,
            progress: capped(streak, 30),
            max: 30,
        },
        Achievement {
            id: "perfectionist",
            title: "Perfectionist",
            description: "Achieve 100% task completion rate",
            unlocked: total > 0 && completed == total,
            progress: completion_rate,
            max: 100,
        },
    ]
}
