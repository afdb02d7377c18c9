use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "In-memory to-do list for the terminal")]
pub struct Cli {
    /// Config file (defaults to the per-user config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive TUI
    Tui,
    /// Run a command script against a fresh board and print the result
    Replay {
        /// Script file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Output format for the final board
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Yaml,
}
