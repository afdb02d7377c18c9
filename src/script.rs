//! Line-oriented command scripts that drive a [`TaskBoard`] the same way
//! the keyboard does. Rows are referenced by their 1-based position in the
//! currently selected tab.

use crate::board::TaskBoard;
use crate::model::{Status, TaskId};
use crate::policy::Action;
use tracing::debug;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument { line: usize, command: String },
    #[error("line {line}: `{value}` is not a row number")]
    InvalidRow { line: usize, value: String },
    #[error("line {line}: unknown tab `{value}` (use todo, done or trash)")]
    UnknownTab { line: usize, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Type(String),
    Submit,
    Open,
    Close,
    Tab(Status),
    Act(Action, usize),
    Toggle(usize),
    Show,
}

/// What a command did, for the replay transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed(String),
    Ignored(String),
    Show(Status),
}

pub fn parse(source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        commands.push((line, parse_line(line, trimmed)?));
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command, ScriptError> {
    let (word, raw_rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let rest = raw_rest.trim();
    let need_arg = || {
        if rest.is_empty() {
            Err(ScriptError::MissingArgument {
                line,
                command: word.to_string(),
            })
        } else {
            Ok(rest)
        }
    };
    let row = || -> Result<usize, ScriptError> {
        let value = need_arg()?;
        match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ScriptError::InvalidRow {
                line,
                value: value.to_string(),
            }),
        }
    };
    let command = match word {
        // `add` accepts an empty argument; the board ignores blank text
        "add" => Command::Add(rest.to_string()),
        // `type` appends verbatim, including leading spaces
        "type" => {
            need_arg()?;
            Command::Type(raw_rest.to_string())
        }
        "submit" => Command::Submit,
        "open" => Command::Open,
        "close" => Command::Close,
        "show" => Command::Show,
        "tab" => Command::Tab(parse_tab(line, need_arg()?)?),
        "done" => Command::Act(Action::MarkDone, row()?),
        "trash" => Command::Act(Action::MoveToTrash, row()?),
        "restore" => Command::Act(Action::Restore, row()?),
        "purge" => Command::Act(Action::DeleteForever, row()?),
        "toggle" => Command::Toggle(row()?),
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };
    Ok(command)
}

fn parse_tab(line: usize, value: &str) -> Result<Status, ScriptError> {
    match value.to_ascii_lowercase().as_str() {
        "todo" | "active" => Ok(Status::Active),
        "done" | "completed" => Ok(Status::Completed),
        "trash" | "deleted" => Ok(Status::Deleted),
        _ => Err(ScriptError::UnknownTab {
            line,
            value: value.to_string(),
        }),
    }
}

pub fn execute(board: &mut TaskBoard, command: &Command) -> Outcome {
    debug!(?command, "replay command");
    match command {
        // a blank add must not clobber the staged draft
        Command::Add(text) if text.trim().is_empty() => Outcome::Ignored("Nothing to add".into()),
        Command::Add(text) => {
            board.compose_mut().set(text);
            submit(board)
        }
        Command::Type(text) => {
            board.compose_mut().insert_str(text);
            Outcome::Changed(format!("Staged \"{}\"", board.compose().value()))
        }
        Command::Submit => submit(board),
        Command::Open => {
            board.set_panel(true);
            Outcome::Changed("Panel opened".into())
        }
        Command::Close => {
            board.set_panel(false);
            Outcome::Changed("Panel closed".into())
        }
        Command::Tab(tab) => {
            board.select_tab(*tab);
            Outcome::Changed(format!("Showing {}", tab.label()))
        }
        Command::Act(action, row) => match row_id(board, *row) {
            Some((id, text)) if board.apply(*action, id) => {
                Outcome::Changed(format!("{} \"{}\"", action.past_tense(), text))
            }
            Some(_) => Outcome::Ignored(format!(
                "{} is not available in {}",
                action.menu_label(board.tab()),
                board.tab().label()
            )),
            None => no_row(board, *row),
        },
        Command::Toggle(row) => match row_id(board, *row) {
            Some((id, text)) => match board.quick_toggle(id) {
                Some(action) => Outcome::Changed(format!("{} \"{}\"", action.past_tense(), text)),
                None => Outcome::Ignored(format!("No checkbox in {}", board.tab().label())),
            },
            None => no_row(board, *row),
        },
        Command::Show => Outcome::Show(board.tab()),
    }
}

fn submit(board: &mut TaskBoard) -> Outcome {
    match board.submit() {
        Some(id) => {
            let text = board
                .store()
                .get(id)
                .map(|t| t.text.clone())
                .unwrap_or_default();
            Outcome::Changed(format!("Added \"{}\"", text))
        }
        None => Outcome::Ignored("Nothing to add".into()),
    }
}

fn row_id(board: &TaskBoard, row: usize) -> Option<(TaskId, String)> {
    board
        .visible()
        .get(row.checked_sub(1)?)
        .map(|t| (t.id, t.text.clone()))
}

fn no_row(board: &TaskBoard, row: usize) -> Outcome {
    Outcome::Ignored(format!("No row {} in {}", row, board.tab().label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (TaskBoard, Vec<Outcome>) {
        let mut board = TaskBoard::new();
        let outcomes = parse(source)
            .unwrap()
            .iter()
            .map(|(_, cmd)| execute(&mut board, cmd))
            .collect();
        (board, outcomes)
    }

    #[test]
    fn parses_commands_skipping_comments() {
        let cmds = parse("# setup\n\nadd Buy milk\ntab Done\ntrash 2\n").unwrap();
        assert_eq!(
            cmds,
            vec![
                (3, Command::Add("Buy milk".into())),
                (4, Command::Tab(Status::Completed)),
                (5, Command::Act(Action::MoveToTrash, 2)),
            ]
        );
    }

    #[test]
    fn reports_bad_lines_with_numbers() {
        assert_eq!(
            parse("add x\nfly 1").unwrap_err(),
            ScriptError::UnknownCommand {
                line: 2,
                command: "fly".into()
            }
        );
        assert!(matches!(
            parse("done 0").unwrap_err(),
            ScriptError::InvalidRow { line: 1, .. }
        ));
        assert!(matches!(
            parse("done").unwrap_err(),
            ScriptError::MissingArgument { line: 1, .. }
        ));
        assert!(matches!(
            parse("tab later").unwrap_err(),
            ScriptError::UnknownTab { line: 1, .. }
        ));
    }

    #[test]
    fn blank_add_is_ignored_not_an_error() {
        let (board, outcomes) = run("add\nadd    ");
        assert!(board.store().is_empty());
        assert!(outcomes.iter().all(|o| matches!(o, Outcome::Ignored(_))));
    }

    #[test]
    fn rows_refer_to_the_current_tab() {
        let (board, outcomes) = run("add A\nadd B\ndone 2\ntab done\ntoggle 1\ntab trash\npurge 1");
        assert_eq!(board.counts(), [1, 0, 0]);
        assert_eq!(board.store().tasks()[0].text, "B");
        assert_eq!(outcomes[2], Outcome::Changed("Marked done \"A\"".into()));
        assert_eq!(outcomes[4], Outcome::Changed("Moved to trash \"A\"".into()));
        // B was left in To Do and has never been trashed
        let (board, _) = run("add B\npurge 1");
        assert_eq!(board.store().len(), 1);
    }

    #[test]
    fn blank_add_keeps_the_draft() {
        let (board, outcomes) = run("open\ntype Call mom\nadd\nadd   ");
        assert_eq!(board.compose().value(), "Call mom");
        assert!(board.panel_open());
        assert!(board.store().is_empty());
        assert_eq!(outcomes[2], Outcome::Ignored("Nothing to add".into()));
    }

    #[test]
    fn staged_text_survives_close() {
        let (board, outcomes) = run("open\ntype Call\ntype  mom\nclose\nsubmit");
        assert_eq!(board.visible()[0].text, "Call mom");
        assert_eq!(outcomes[4], Outcome::Changed("Added \"Call mom\"".into()));
    }

    #[test]
    fn unavailable_actions_are_ignored() {
        let (board, outcomes) = run("add A\nrestore 1\ndone 5");
        assert_eq!(board.counts(), [1, 0, 0]);
        assert!(matches!(&outcomes[1], Outcome::Ignored(msg) if msg.contains("not available")));
        assert!(matches!(&outcomes[2], Outcome::Ignored(msg) if msg.contains("No row 5")));
    }
}
