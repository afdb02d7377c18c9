//! Which row actions a tab offers, and what each one does.
//!
//! Permanent removal is only offered from the Trash tab, so a task always
//! passes through `Status::Deleted` before it can be purged.

use crate::model::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MarkDone,
    MoveToTrash,
    Restore,
    DeleteForever,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetStatus(Status),
    Remove,
}

const ACTIVE_ACTIONS: &[Action] = &[Action::MarkDone, Action::MoveToTrash];
const COMPLETED_ACTIONS: &[Action] = &[Action::MoveToTrash];
const DELETED_ACTIONS: &[Action] = &[Action::Restore, Action::DeleteForever];

impl Action {
    pub fn offered(tab: Status) -> &'static [Action] {
        match tab {
            Status::Active => ACTIVE_ACTIONS,
            Status::Completed => COMPLETED_ACTIONS,
            Status::Deleted => DELETED_ACTIONS,
        }
    }

    pub fn is_offered_in(&self, tab: Status) -> bool {
        Action::offered(tab).contains(self)
    }

    /// The checkbox shortcut for a tab. Trash has no checkbox.
    pub fn quick_toggle(tab: Status) -> Option<Action> {
        match tab {
            Status::Active => Some(Action::MarkDone),
            Status::Completed => Some(Action::MoveToTrash),
            Status::Deleted => None,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Action::MarkDone => Effect::SetStatus(Status::Completed),
            Action::MoveToTrash => Effect::SetStatus(Status::Deleted),
            Action::Restore => Effect::SetStatus(Status::Active),
            Action::DeleteForever => Effect::Remove,
        }
    }

    pub fn menu_label(&self, tab: Status) -> &'static str {
        match (self, tab) {
            (Action::MarkDone, _) => "Done",
            (Action::MoveToTrash, Status::Completed) => "Trash",
            (Action::MoveToTrash, _) => "Move to Trash",
            (Action::Restore, _) => "Move Back to To Do",
            (Action::DeleteForever, _) => "Delete Forever",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::MarkDone => "Marked done",
            Action::MoveToTrash => "Moved to trash",
            Action::Restore => "Restored",
            Action::DeleteForever => "Deleted forever",
        }
    }
}
