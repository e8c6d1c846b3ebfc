//! # Searchsync Engine
//!
//! The import reconciliation engine for browser search-engine backups.
//!
//! Browsers keep their custom search engines in a `keywords` table inside
//! the profile's `Web Data` SQLite store. This crate is the pure core of a
//! tool that exports those rows to a portable JSON backup and imports them
//! back, reconciling the incoming batch against whatever the target store
//! already contains.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of files, SQLite, or terminals
//! - **Deterministic**: classification depends only on its two inputs
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`KeywordRecord`] is one row of the `keywords` table: an ordered list
//! of typed [`Value`]s. The leading columns (id, name, shortcut, URLs) have
//! stable positions; trailing columns vary by store version and are carried
//! opaquely.
//!
//! ### Codec
//!
//! [`codec::encode_batch`] and [`codec::decode_batch`] convert record
//! batches to and from the portable backup text, a lossless round-trip
//! pair. Binary fields travel as tagged base64 text.
//!
//! ### Schema adaptation
//!
//! Store versions differ in trailing column count. [`adapt::adapt`] pads or
//! truncates a record's tail to the width the live target store declares.
//!
//! ### Reconciliation
//!
//! [`reconcile::reconcile`] partitions an incoming batch against the
//! store's existing records into inserts, silently-skipped duplicates, and
//! conflicts. Conflicts carry a rendered per-field diff and are decided by
//! an external [`DecisionProvider`]; the engine never guesses.
//!
//! ## Quick Start
//!
//! ```rust
//! use searchsync_engine::{reconcile, KeywordRecord, Value};
//!
//! let existing = vec![KeywordRecord::new(vec![
//!     Value::Integer(1),
//!     Value::text("Google"),
//!     Value::text("google"),
//!     Value::text("favicon.ico"),
//!     Value::text("https://google.es/search?q={searchTerms}"),
//! ])];
//!
//! let incoming = vec![KeywordRecord::new(vec![
//!     Value::Integer(1),
//!     Value::text("Google"),
//!     Value::text("google"),
//!     Value::text("favicon.ico"),
//!     Value::text("https://google.com/search?q={searchTerms}"),
//! ])];
//!
//! let set = reconcile(&existing, incoming);
//! assert_eq!(set.conflicts.len(), 1);
//! assert!(set.conflicts[0].diff.contains("URL:"));
//! ```

pub mod adapt;
pub mod codec;
pub mod diff;
pub mod error;
pub mod record;
pub mod reconcile;
pub mod value;

// Re-export main types at crate root
pub use adapt::{adapt, TableSchema};
pub use codec::{decode_batch, encode_batch};
pub use diff::FieldDiff;
pub use error::Error;
pub use reconcile::{
    identity_key, reconcile, Conflict, DecisionProvider, DecisionSet, ImportPlan, Resolution,
};
pub use record::{column, KeywordRecord};
pub use value::Value;

/// Type aliases for clarity
pub type ColumnName = String;
pub type ConflictKey = String;
