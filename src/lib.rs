pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod input;
pub mod logging;
pub mod model;
pub mod policy;
pub mod script;
pub mod store;
pub mod ui;

pub use board::TaskBoard;
pub use model::{Status, Task, TaskId};
pub use policy::Action;
