use crate::board::TaskBoard;
use crate::cli::Format;
use crate::config::{default_log_path, Config};
use crate::filter;
use crate::logging::{self, LogTarget};
use crate::model::{Status, Task};
use crate::script::{self, Outcome};
use crate::ui;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn tui(config_path: Option<&Path>, log_file: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).context("loading config")?;
    // the terminal belongs to the UI, so logs always go to a file
    if let Some(path) = log_file.or_else(default_log_path) {
        if let Err(err) = logging::init(LogTarget::File(&path), &config.log_filter) {
            eprintln!("logging disabled: {err:#}");
        }
    }
    info!(tick_ms = config.tick_rate_ms, "starting tui");
    ui::run(TaskBoard::new(), config)
}

pub fn replay(
    config_path: Option<&Path>,
    log_file: Option<PathBuf>,
    file: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let config = Config::load(config_path).context("loading config")?;
    match &log_file {
        Some(path) => logging::init(LogTarget::File(path), &config.log_filter)?,
        None => logging::init(LogTarget::Stderr, &config.log_filter)?,
    }

    let source = match &file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading script {:?}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_script(&source, format, &mut out)
}

/// Replays `source` on a fresh board, writing the transcript and the final
/// board to `out`.
pub fn run_script(source: &str, format: Format, out: &mut impl Write) -> Result<()> {
    let commands = script::parse(source)?;
    info!(commands = commands.len(), "replaying script");

    let mut board = TaskBoard::new();
    for (line, command) in &commands {
        match script::execute(&mut board, command) {
            Outcome::Changed(msg) => writeln!(out, "{line:>3}  {msg}")?,
            Outcome::Ignored(msg) => {
                warn!(line, %msg, "command had no effect");
                writeln!(out, "{line:>3}  (ignored) {msg}")?;
            }
            Outcome::Show(tab) => print_tab(out, &board, tab)?,
        }
    }

    match format {
        Format::Text => {
            writeln!(out)?;
            for tab in Status::ALL {
                print_tab(out, &board, tab)?;
            }
        }
        Format::Yaml => {
            let snapshot = board.store().snapshot();
            let yaml = serde_yaml::to_string(&*snapshot).context("serializing board")?;
            write!(out, "{yaml}")?;
        }
    }
    Ok(())
}

fn print_tab(out: &mut impl Write, board: &TaskBoard, tab: Status) -> Result<()> {
    let tasks: Vec<&Task> = filter::visible(board.store().tasks(), tab);
    writeln!(out, "{} ({})", tab.label(), tasks.len())?;
    if tasks.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (idx, task) in tasks.iter().enumerate() {
        let mark = match task.status {
            Status::Active => "[ ]",
            Status::Completed => "[x]",
            Status::Deleted => "   ",
        };
        writeln!(out, "  {}. {} {}", idx + 1, mark, task.text)?;
    }
    Ok(())
}
