use crate::model::{Status, Task, TaskId};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Issues task ids from a millisecond clock, bumping past the last id when
/// the clock has not moved (or moved backwards).
#[derive(Debug, Default, Clone)]
pub struct IdSource {
    last: TaskId,
}

impl IdSource {
    pub fn next_at(&mut self, now_ms: TaskId) -> TaskId {
        let id = if now_ms > self.last {
            now_ms
        } else {
            self.last + 1
        };
        self.last = id;
        id
    }

    pub fn next(&mut self) -> TaskId {
        let now = Utc::now().timestamp_millis().max(0) as TaskId;
        self.next_at(now)
    }
}

/// Ordered, newest-first collection of tasks. Mutations swap in a new
/// snapshot; a snapshot handed out earlier never changes.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Arc<[Task]>,
    ids: IdSource,
    version: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Arc::from(Vec::new()),
            ids: IdSource::default(),
            version: 0,
        }
    }

    pub fn snapshot(&self) -> Arc<[Task]> {
        Arc::clone(&self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Prepends a new active task. Returns `None` when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.ids.next();
        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(Task::new(id, text));
        next.extend(self.tasks.iter().cloned());
        self.replace(next);
        debug!(id, text, "task added");
        Some(id)
    }

    /// Sets the status of task `id`. Returns `false` when no such task exists.
    pub fn change_status(&mut self, id: TaskId, status: Status) -> bool {
        let current = match self.get(id) {
            Some(task) => task.status,
            None => return false,
        };
        if current == status {
            return true;
        }
        let next = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    Task {
                        status,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        self.replace(next);
        debug!(id, from = %current, to = %status, "task status changed");
        true
    }

    /// Drops task `id` whatever its status. Returns `false` when absent.
    pub fn remove(&mut self, id: TaskId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let next = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.replace(next);
        debug!(id, "task removed");
        true
    }

    fn replace(&mut self, next: Vec<Task>) {
        self.tasks = Arc::from(next);
        self.version += 1;
    }
}
