//! User configuration read from `~/.lunchly/lunchly.toml`. Every key is
//! optional; a missing file means "use the defaults".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::db::{EmptyResults, DEFAULT_TOP_LIMIT};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".lunchly";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "lunchly.sqlite";
const CONFIG_FILE_NAME: &str = "lunchly.toml";
const LOG_FILE_NAME: &str = "lunchly.log";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LunchlyConfig {
    /// Path of the SQLite database file.
    pub database: Option<PathBuf>,
    /// Number of rows in the top customers view. Must be at least 1.
    pub top_limit: Option<usize>,
    /// Whether empty search/ranking results are errors.
    pub empty_results: EmptyResults,
    /// `tracing` filter directive, e.g. `info` or `lunchly=debug`.
    pub log_filter: Option<String>,
}

impl LunchlyConfig {
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DB_FILE_NAME)),
        }
    }

    pub fn top_limit(&self) -> usize {
        self.top_limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }
}

/// Resolve the application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

/// Where the TUI writes its log so the alternate screen stays clean.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}

/// Load the config from `path`, or from the default location when `None`.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<LunchlyConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        return Ok(LunchlyConfig::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<LunchlyConfig> {
    let config: LunchlyConfig = toml::from_str(contents).context("failed to parse config")?;
    if config.top_limit == Some(0) {
        bail!("top_limit must be at least 1");
    }
    Ok(config)
}
