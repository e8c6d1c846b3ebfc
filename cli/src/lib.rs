//! Searchsync CLI - export and import browser search engines.
//!
//! This crate wraps the pure reconciliation engine with everything a local
//! tool needs: SQLite access to the browser's `Web Data` store, backup
//! file IO, per-OS browser profile locations, and decision providers for
//! resolving import conflicts.

pub mod backup;
pub mod config;
pub mod decision;
pub mod error;
pub mod locations;
pub mod ops;
pub mod store;

pub use config::Config;
pub use decision::ConflictPolicy;
pub use error::{AppError, Result};
pub use ops::{export, import, ImportSummary};
pub use store::{KeywordStore, WriteMode};
