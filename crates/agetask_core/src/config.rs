//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, log level and log directory.
//!
//! # Invariants
//! - Blank variables fall back to defaults.
//! - An unsupported log level or a relative log directory is an error,
//!   never silently replaced.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "AGETASK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "AGETASK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "AGETASK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "agetask.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "agetask-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl TrackerConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = resolve_db_path(non_blank(DB_PATH_ENV));

        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(raw.as_str()).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match non_blank(LOG_DIR_ENV).map(PathBuf::from) {
            Some(dir) if !dir.is_absolute() => return Err(ConfigError::RelativeLogDir(dir)),
            Some(dir) => dir,
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

/// Database path from `AGETASK_DB_PATH`, or the temp-dir default.
///
/// Independent of the other variables, so a bad log setting never hides
/// the database.
pub fn db_path_from_env() -> PathBuf {
    resolve_db_path(
        std::env::var(DB_PATH_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty()),
    )
}

fn resolve_db_path(raw: Option<String>) -> PathBuf {
    raw.map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}
