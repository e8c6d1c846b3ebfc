//! Schema adaptation between store versions.
//!
//! The same logical `keywords` table varies in column count across browsers
//! and versions (27 columns in Chromium, 28 in Edge with a trailing
//! `url_hash` blob). New columns are always appended at the tail, so a
//! record is reshaped by padding or truncating its tail to the target
//! width. Positional meaning of shared columns is assumed stable; that
//! assumption is not validated at runtime.

use crate::record::KeywordRecord;
use crate::value::Value;
use crate::ColumnName;

/// The live column layout of one target store at one point in time.
///
/// Callers read this from the store immediately before every write and
/// never cache it across operations, so external schema changes between
/// operations are picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<ColumnName>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnName>) -> Self {
        Self { columns }
    }

    /// Column names, in store order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Number of columns the store currently declares.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Reshape a record to this schema's width.
    pub fn adapt(&self, record: &KeywordRecord) -> KeywordRecord {
        adapt(record, self.width())
    }
}

/// Reshape a record to exactly `width` fields.
///
/// Narrow records are padded with nulls; wide records lose their trailing
/// fields. A record already at the target width is returned unchanged, so
/// adaptation is idempotent.
pub fn adapt(record: &KeywordRecord, width: usize) -> KeywordRecord {
    let mut fields = record.fields().to_vec();
    if fields.len() < width {
        fields.resize(width, Value::Null);
    } else {
        fields.truncate(width);
    }
    KeywordRecord::new(fields)
}
