use serde::{Deserialize, Serialize};
use std::fmt;

pub type TaskId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: Status,
}

/// The three categories a task can be in. Also used as the tab selector.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Active,
    Completed,
    Deleted,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Completed, Status::Deleted];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "To Do",
            Status::Completed => "Done",
            Status::Deleted => "Trash",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Status::Active => 0,
            Status::Completed => 1,
            Status::Deleted => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Status> {
        Status::ALL.get(idx).copied()
    }

    pub fn next(&self) -> Status {
        Status::ALL[(self.index() + 1) % Status::ALL.len()]
    }

    pub fn prev(&self) -> Status {
        Status::ALL[(self.index() + Status::ALL.len() - 1) % Status::ALL.len()]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Active => "active",
            Status::Completed => "completed",
            Status::Deleted => "deleted",
        })
    }
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            status: Status::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}
