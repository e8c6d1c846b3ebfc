//! Unified error handling for the CLI.

use std::path::PathBuf;

/// Application error type.
///
/// Every variant maps to a distinct user-facing message. None of these are
/// retried: the user must supply a different file, close the browser, or
/// fix the backup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("no data found in the backup file {0}")]
    EmptyBackup(PathBuf),

    #[error("{0} has no keywords table; not a search engine store")]
    NotAKeywordStore(PathBuf),

    #[error(transparent)]
    Engine(#[from] searchsync_engine::Error),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("write to store failed: {source}")]
    WriteFailed {
        #[source]
        source: rusqlite::Error,
    },

    #[error("unknown browser: {0}")]
    UnknownBrowser(String),

    #[error("no store specified; pass --store PATH or --browser NAME")]
    NoStore,

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, AppError>;
