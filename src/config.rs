use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.yml";
const LOG_FILE: &str = "taskboard.log";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("tick_rate_ms must be between 10 and 5000, got {0}")]
    TickRate(u64),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub tagline: String,
    pub tick_rate_ms: u64,
    pub show_help: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "Simple To Do List".into(),
            tagline: "Today is awesome day. The weather is awesome, you are awesome too!".into(),
            tick_rate_ms: 200,
            show_help: true,
            log_filter: "taskboard=info".into(),
        }
    }
}

impl Config {
    /// Loads `path`, or the per-user config file when no path is given.
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Config::from_file(&p),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::parse(&data).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse(data: &str) -> Result<Config, ConfigError> {
        // an empty document means "all defaults"
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(data).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(10..=5000).contains(&self.tick_rate_ms) {
            return Err(ConfigError::TickRate(self.tick_rate_ms));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "taskboard")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}
