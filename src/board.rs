use crate::filter;
use crate::input::ComposeField;
use crate::model::{Status, Task, TaskId};
use crate::policy::{Action, Effect};
use crate::store::TaskStore;
use tracing::{debug, trace};

/// All state behind the screen: the store, the selected tab, the compose
/// field and whether the creation drawer is open.
#[derive(Debug, Default)]
pub struct TaskBoard {
    store: TaskStore,
    tab: Status,
    compose: ComposeField,
    panel_open: bool,
}

impl TaskBoard {
    pub fn new() -> Self {
        TaskBoard::default()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tab(&self) -> Status {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Status) {
        self.tab = tab;
    }

    pub fn visible(&self) -> Vec<&Task> {
        filter::visible(self.store.tasks(), self.tab)
    }

    pub fn counts(&self) -> [usize; 3] {
        filter::counts(self.store.tasks())
    }

    pub fn compose(&self) -> &ComposeField {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeField {
        &mut self.compose
    }

    pub fn can_submit(&self) -> bool {
        !self.compose.is_blank()
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn set_panel(&mut self, open: bool) {
        self.panel_open = open;
    }

    /// Commits the staged text. On success the field is cleared, the To Do
    /// tab is selected and the drawer closes; blank text changes nothing.
    pub fn submit(&mut self) -> Option<TaskId> {
        let id = self.store.add(self.compose.value())?;
        self.compose.clear();
        self.tab = Status::Active;
        self.panel_open = false;
        Some(id)
    }

    /// Runs `action` on task `id` when the current tab offers it and the
    /// task is listed there. Returns whether anything happened.
    pub fn apply(&mut self, action: Action, id: TaskId) -> bool {
        if !action.is_offered_in(self.tab) {
            trace!(?action, tab = %self.tab, "action not offered in tab");
            return false;
        }
        match self.store.get(id) {
            Some(task) if task.status == self.tab => {}
            _ => {
                trace!(?action, id, tab = %self.tab, "task not listed in tab");
                return false;
            }
        }
        let applied = match action.effect() {
            Effect::SetStatus(status) => self.store.change_status(id, status),
            Effect::Remove => self.store.remove(id),
        };
        if applied {
            debug!(?action, id, "action applied");
        }
        applied
    }

    /// The checkbox shortcut: done in To Do, trash in Done, nothing in Trash.
    pub fn quick_toggle(&mut self, id: TaskId) -> Option<Action> {
        let action = Action::quick_toggle(self.tab)?;
        self.apply(action, id).then_some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(board: &mut TaskBoard, text: &str) -> TaskId {
        board.compose_mut().set(text);
        board.submit().expect("non-blank text")
    }

    #[test]
    fn submit_resets_staging_tab_and_panel() {
        let mut board = TaskBoard::new();
        board.select_tab(Status::Deleted);
        board.set_panel(true);
        board.compose_mut().set("  Buy milk ");
        assert!(board.can_submit());
        board.submit().unwrap();
        assert_eq!(board.tab(), Status::Active);
        assert!(!board.panel_open());
        assert_eq!(board.compose().value(), "");
        assert_eq!(board.visible()[0].text, "Buy milk");
    }

    #[test]
    fn blank_submit_leaves_everything_alone() {
        let mut board = TaskBoard::new();
        board.select_tab(Status::Completed);
        board.set_panel(true);
        board.compose_mut().set("   ");
        assert!(!board.can_submit());
        assert_eq!(board.submit(), None);
        assert_eq!(board.tab(), Status::Completed);
        assert!(board.panel_open());
        assert_eq!(board.compose().value(), "   ");
        assert!(board.store().is_empty());
    }

    #[test]
    fn actions_outside_their_tab_are_ignored() {
        let mut board = TaskBoard::new();
        let a = add(&mut board, "A");
        assert!(!board.apply(Action::DeleteForever, a));
        assert!(!board.apply(Action::Restore, a));
        assert!(board.apply(Action::MarkDone, a));
        // still on To Do, where A is no longer listed
        assert!(!board.apply(Action::MoveToTrash, a));
        assert_eq!(board.store().get(a).unwrap().status, Status::Completed);
    }

    #[test]
    fn purge_requires_trash_first() {
        let mut board = TaskBoard::new();
        let a = add(&mut board, "A");
        board.select_tab(Status::Deleted);
        assert!(!board.apply(Action::DeleteForever, a));
        board.select_tab(Status::Active);
        assert!(board.apply(Action::MoveToTrash, a));
        board.select_tab(Status::Deleted);
        assert!(board.apply(Action::DeleteForever, a));
        assert!(board.store().is_empty());
    }

    #[test]
    fn quick_toggle_follows_tab() {
        let mut board = TaskBoard::new();
        let a = add(&mut board, "A");
        assert_eq!(board.quick_toggle(a), Some(Action::MarkDone));
        board.select_tab(Status::Completed);
        assert_eq!(board.quick_toggle(a), Some(Action::MoveToTrash));
        board.select_tab(Status::Deleted);
        assert_eq!(board.quick_toggle(a), None);
        assert_eq!(board.store().get(a).unwrap().status, Status::Deleted);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut board = TaskBoard::new();
        let a = add(&mut board, "A");
        assert!(!board.apply(Action::MarkDone, a + 1));
        assert_eq!(board.quick_toggle(a + 1), None);
        assert_eq!(board.counts(), [1, 0, 0]);
    }
}
