use crate::models::{
    DailyUpdate, DailyUpdateDraft, Status, Task, TaskDraft, TaskPatch, normalize_tags,
};
use crate::stats::{self, WeeklyStats};
use crate::storage::Storage;
use crate::utils;

/// In-memory task collection backed by the tasks snapshot entry.
///
/// The only way to obtain a store is `load`, which reads the snapshot first,
/// so a save can never run before the load has happened. Every mutation
/// mirrors the full collection back to storage.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskStore {
    /// Read the tasks snapshot and return a ready store
    pub fn load(storage: Storage) -> Self {
        let tasks = storage.load_tasks();
        Self { tasks, storage }
    }

    /// Append a new task with a fresh id and creation timestamp
    pub fn add(&mut self, draft: TaskDraft) -> &Task {
        let index = self.tasks.len();
        self.tasks.push(Task::new(draft));
        self.persist();
        &self.tasks[index]
    }

    /// Merge the supplied fields into the matching task.
    ///
    /// The first merge that moves status to done stamps `completed_at`; an
    /// already-set completion timestamp is never overwritten, even when the
    /// status leaves done and comes back. An unknown id is a silent no-op.
    pub fn update(&mut self, id: &str, patch: TaskPatch) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(category) = patch.category {
                task.category = category;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = Some(due_date);
            }
            if let Some(tags) = patch.tags {
                task.tags = normalize_tags(&tags);
            }
            if let Some(status) = patch.status {
                task.status = status;
                if status == Status::Done && task.completed_at.is_none() {
                    task.completed_at = Some(utils::now_rfc3339());
                }
            }
            self.persist();
        }
    }

    /// Remove the task with the matching id; silent no-op when absent
    pub fn delete(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Look up a task by id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Lazily filter tasks by status, in insertion order
    pub fn by_status(&self, status: Status) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Compute the weekly stats fresh from current state
    pub fn weekly_stats(&self) -> WeeklyStats {
        stats::weekly_stats(&self.tasks)
    }

    fn persist(&self) {
        // A failed snapshot write is a recoverable warning; in-memory state stands
        if let Err(e) = self.storage.save_tasks(&self.tasks) {
            log::warn!("tasks snapshot not persisted: {}", e);
        }
    }
}

/// In-memory daily-update collection backed by the daily-updates snapshot entry.
///
/// Same lifecycle as `TaskStore`: loading is the only constructor, mutations
/// mirror the full collection. The store does not enforce one entry per day;
/// callers that want that check `today_entry` before adding.
pub struct DailyUpdateStore {
    updates: Vec<DailyUpdate>,
    storage: Storage,
}

impl DailyUpdateStore {
    /// Read the daily-updates snapshot and return a ready store
    pub fn load(storage: Storage) -> Self {
        let updates = storage.load_updates();
        Self { updates, storage }
    }

    /// Append a new update with a fresh id
    pub fn add(&mut self, draft: DailyUpdateDraft) -> &DailyUpdate {
        let index = self.updates.len();
        self.updates.push(DailyUpdate::new(draft));
        self.persist();
        &self.updates[index]
    }

    /// Remove the update with the matching id; silent no-op when absent
    pub fn delete(&mut self, id: &str) {
        let before = self.updates.len();
        self.updates.retain(|u| u.id != id);
        if self.updates.len() != before {
            self.persist();
        }
    }

    /// The entry whose date is today's local calendar date, if any.
    /// When several share the date, the first in store order wins.
    pub fn today_entry(&self) -> Option<&DailyUpdate> {
        let today = utils::today_string();
        self.updates.iter().find(|u| u.date == today)
    }

    /// All updates in insertion order
    pub fn updates(&self) -> &[DailyUpdate] {
        &self.updates
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save_updates(&self.updates) {
            log::warn!("daily-updates snapshot not persisted: {}", e);
        }
    }
}
