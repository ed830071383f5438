use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils;

/// Task grouping used for analytics breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Learning,
    Health,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Learning,
        Category::Health,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Learning => "learning",
            Category::Health => "health",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            "learning" => Ok(Category::Learning),
            "health" => Ok(Category::Health),
            other => Err(format!(
                "unknown category '{}': expected work|personal|learning|health",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "unknown priority '{}': expected low|medium|high",
                other
            )),
        }
    }
}

/// Kanban column a task currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(format!(
                "unknown status '{}': expected todo|in-progress|done",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Challenging,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Challenging => "challenging",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "great" => Ok(Mood::Great),
            "good" => Ok(Mood::Good),
            "okay" => Ok(Mood::Okay),
            "challenging" => Ok(Mood::Challenging),
            other => Err(format!(
                "unknown mood '{}': expected great|good|okay|challenging",
                other
            )),
        }
    }
}

/// A unit of work on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>, // ISO 8601: YYYY-MM-DD
    pub created_at: String, // RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>, // RFC 3339
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fields the caller supplies when creating a task (id and created_at are stamped by the store)
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<String>,
    pub tags: Vec<String>,
}

/// Partial task update: only supplied fields are merged
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Task {
    /// Build a task from a draft with a fresh id and creation timestamp
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            created_at: utils::now_rfc3339(),
            completed_at: None,
            tags: normalize_tags(&draft.tags),
        }
    }
}

/// A reflective journal entry for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUpdate {
    pub id: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub learnings: String,
    #[serde(default)]
    pub tomorrow: String,
}

/// Fields the caller supplies when recording a daily update
#[derive(Debug, Clone)]
pub struct DailyUpdateDraft {
    pub date: String,
    pub task_id: Option<String>,
    pub content: String,
    pub mood: Mood,
    pub learnings: String,
    pub tomorrow: String,
}

impl DailyUpdate {
    /// Build an update from a draft with a fresh id
    pub fn new(draft: DailyUpdateDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: draft.date,
            task_id: draft.task_id,
            content: draft.content,
            mood: draft.mood,
            learnings: draft.learnings,
            tomorrow: draft.tomorrow,
        }
    }
}

/// The signed-in user, as mirrored from the remote user directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub join_date: String, // RFC 3339
}

/// Partial profile update merged by Session::update
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub theme: Option<String>,
}

pub(crate) fn default_theme() -> String {
    "light".to_string()
}

/// Normalize tags: trim, lowercase, drop empties, dedup keeping first occurrence
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let value = tag.trim().to_lowercase();
        if !value.is_empty() && !normalized.contains(&value) {
            normalized.push(value);
        }
    }
    normalized
}
