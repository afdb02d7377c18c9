use std::collections::HashSet;
use taskboard::filter::visible;
use taskboard::policy::Effect;
use taskboard::store::TaskStore;
use taskboard::{Action, Status, TaskBoard, TaskId};

fn add(board: &mut TaskBoard, text: &str) -> TaskId {
    board.compose_mut().set(text);
    board.submit().expect("task should be added")
}

fn texts(board: &TaskBoard, tab: Status) -> Vec<String> {
    visible(board.store().tasks(), tab)
        .iter()
        .map(|t| t.text.clone())
        .collect()
}

#[test]
fn single_add_shows_only_in_todo() {
    let mut board = TaskBoard::new();
    let id = add(&mut board, "Buy milk");
    let task = board.store().get(id).unwrap();
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.status, Status::Active);
    assert_eq!(texts(&board, Status::Active), ["Buy milk"]);
    assert!(texts(&board, Status::Completed).is_empty());
    assert!(texts(&board, Status::Deleted).is_empty());
}

#[test]
fn full_lifecycle_through_trash() {
    let mut board = TaskBoard::new();
    let a = add(&mut board, "A");
    let b = add(&mut board, "B");
    assert!(b > a);
    assert_eq!(texts(&board, Status::Active), ["B", "A"]);

    assert!(board.apply(Action::MarkDone, a));
    assert_eq!(texts(&board, Status::Active), ["B"]);
    assert_eq!(texts(&board, Status::Completed), ["A"]);

    board.select_tab(Status::Completed);
    assert!(board.apply(Action::MoveToTrash, a));
    assert!(texts(&board, Status::Completed).is_empty());
    assert_eq!(texts(&board, Status::Deleted), ["A"]);

    // restore keeps store position instead of moving A to the front
    board.select_tab(Status::Deleted);
    assert!(board.apply(Action::Restore, a));
    assert!(texts(&board, Status::Deleted).is_empty());
    assert_eq!(texts(&board, Status::Active), ["B", "A"]);

    board.select_tab(Status::Active);
    assert!(board.apply(Action::MoveToTrash, a));
    board.select_tab(Status::Deleted);
    assert!(board.apply(Action::DeleteForever, a));
    assert!(board.store().get(a).is_none());
    for tab in Status::ALL {
        assert!(visible(board.store().tasks(), tab).iter().all(|t| t.id != a));
    }
    assert_eq!(board.store().len(), 1);
}

#[test]
fn store_accepts_any_transition_directly() {
    let mut store = TaskStore::new();
    let a = store.add("A").unwrap();
    assert!(store.change_status(a, Status::Deleted));
    assert!(store.change_status(a, Status::Completed));
    assert!(store.change_status(a, Status::Active));
    assert!(store.remove(a));
    assert!(!store.remove(a));
}

#[test]
fn ids_stay_unique_and_order_is_newest_first() {
    let mut board = TaskBoard::new();
    let ids: Vec<_> = (0..50).map(|n| add(&mut board, &format!("t{n}"))).collect();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    let stored: Vec<_> = board.store().tasks().iter().map(|t| t.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(stored, expected);
}

/// Walks every reachable (status, action) pair and checks that removal is
/// only ever reached from the deleted status.
#[test]
fn removal_is_only_reachable_from_trash() {
    let mut seen = HashSet::new();
    let mut frontier = vec![Status::Active];
    while let Some(status) = frontier.pop() {
        if !seen.insert(status) {
            continue;
        }
        for action in Action::offered(status) {
            match action.effect() {
                Effect::Remove => assert_eq!(status, Status::Deleted),
                Effect::SetStatus(next) => frontier.push(next),
            }
        }
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn filter_partitions_store() {
    let mut board = TaskBoard::new();
    let ids: Vec<_> = (0..9).map(|n| add(&mut board, &format!("t{n}"))).collect();
    for (n, id) in ids.iter().enumerate() {
        match n % 3 {
            1 => {
                board.apply(Action::MarkDone, *id);
            }
            2 => {
                board.apply(Action::MoveToTrash, *id);
            }
            _ => {}
        }
    }
    let all: Vec<_> = board.store().tasks().iter().map(|t| t.id).collect();
    for tab in Status::ALL {
        let view: Vec<_> = visible(board.store().tasks(), tab).iter().map(|t| t.id).collect();
        let expected: Vec<_> = all
            .iter()
            .copied()
            .filter(|id| board.store().get(*id).unwrap().status == tab)
            .collect();
        assert_eq!(view, expected);
        assert_eq!(view.len(), 3);
    }
    assert_eq!(board.counts(), [3, 3, 3]);
}
