use crate::model::{Status, Task};

/// Tasks with the given status, in store order.
pub fn visible(tasks: &[Task], status: Status) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

/// Number of tasks per category, indexed by `Status::index`.
pub fn counts(tasks: &[Task]) -> [usize; 3] {
    let mut out = [0; 3];
    for task in tasks {
        out[task.status.index()] += 1;
    }
    out
}
