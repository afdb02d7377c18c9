use anyhow::Result;
use clap::Parser;
use taskboard::{cli, commands};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    let config = args.config.as_deref();
    match command {
        cli::Command::Tui => commands::tui(config, args.log_file),
        cli::Command::Replay { file, format } => {
            commands::replay(config, args.log_file, file, format)
        }
    }
}
