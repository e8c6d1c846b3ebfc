//! Configuration management for the CLI.

use std::env;
use std::path::PathBuf;

/// Default backup file name, used when neither flag nor environment
/// overrides it.
pub const DEFAULT_BACKUP_FILE: &str = "engines.json";

/// CLI configuration loaded from environment variables.
///
/// Command-line flags take precedence over these values; the environment
/// only supplies defaults, so every operation still receives its backup
/// path as an explicit parameter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default backup file path
    pub backup_file: PathBuf,
    /// Default browser for store path resolution
    pub browser: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backup_file = match env::var("SEARCHSYNC_BACKUP") {
            Ok(v) if v.is_empty() => return Err(ConfigError::EmptyBackupPath),
            Ok(v) => PathBuf::from(v),
            Err(_) => PathBuf::from(DEFAULT_BACKUP_FILE),
        };

        let browser = env::var("SEARCHSYNC_BROWSER").ok().filter(|b| !b.is_empty());

        Ok(Self {
            backup_file,
            browser,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SEARCHSYNC_BACKUP is set but empty")]
    EmptyBackupPath,
}
