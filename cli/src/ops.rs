//! Export and import operations.
//!
//! These are the synchronous, blocking entry points the CLI (or any other
//! embedding) drives. Each step opens its own store connection; nothing is
//! cached between the read, classify, and write phases.

use crate::backup;
use crate::error::Result;
use crate::store::{KeywordStore, WriteMode};
use searchsync_engine::{reconcile, DecisionProvider};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Counts reported after a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// New records written to the store
    pub inserted: usize,
    /// Conflicting records overwritten on the provider's decision
    pub replaced: usize,
    /// Incoming records identical to existing entries, dropped silently
    pub skipped: usize,
    /// Conflicts put to the decision provider (replaced or kept)
    pub conflicts_resolved: usize,
}

/// Export every record in the store to a backup file.
///
/// Returns the number of records written.
pub fn export(store: &KeywordStore, backup_path: &Path) -> Result<usize> {
    let records = store.read_all()?;
    backup::write_backup(backup_path, &records)?;

    info!(
        count = records.len(),
        store = %store.path().display(),
        backup = %backup_path.display(),
        "exported search engines"
    );
    Ok(records.len())
}

/// Import a backup into the store, reconciling against its current state.
///
/// Classification runs against a snapshot of the store taken up front;
/// the provider is consulted once per conflict; inserts and replacements
/// are then applied as one atomic batch each.
pub fn import(
    backup_path: &Path,
    store: &KeywordStore,
    provider: &mut dyn DecisionProvider,
) -> Result<ImportSummary> {
    let incoming = backup::read_backup(backup_path)?;
    let existing = store.read_all()?;

    let set = reconcile(&existing, incoming);
    info!(
        to_insert = set.to_insert.len(),
        conflicts = set.conflicts.len(),
        skipped = set.skipped,
        "classified incoming batch"
    );

    let plan = set.resolve(provider);

    let inserted = if plan.to_insert.is_empty() {
        0
    } else {
        store.write(&plan.to_insert, WriteMode::InsertIfAbsent)?
    };
    let replaced = if plan.to_replace.is_empty() {
        0
    } else {
        store.write(&plan.to_replace, WriteMode::Overwrite)?
    };

    let summary = ImportSummary {
        inserted,
        replaced,
        skipped: plan.skipped,
        conflicts_resolved: plan.conflicts_resolved,
    };
    info!(
        inserted = summary.inserted,
        replaced = summary.replaced,
        skipped = summary.skipped,
        conflicts_resolved = summary.conflicts_resolved,
        store = %store.path().display(),
        "imported search engines"
    );
    Ok(summary)
}
