//! SQLite access to a browser's `keywords` table.
//!
//! Every operation opens its own connection and closes it on return; no
//! connection or schema information is held across operations. The live
//! column layout is re-read before every write, so schema drift between
//! browser versions (and concurrent external changes) is picked up.

use crate::error::{AppError, Result};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use searchsync_engine::{KeywordRecord, TableSchema, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a batch is applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Never overwrite a row whose store identity already exists
    InsertIfAbsent,
    /// Replace rows whose store identity already exists
    Overwrite,
}

/// Handle to one target store (a browser profile's `Web Data` file).
///
/// The handle holds only the path. Callers must serialize access to one
/// store themselves: the browser has to be closed, and import and export
/// must not run against the same file at once.
#[derive(Debug, Clone)]
pub struct KeywordStore {
    path: PathBuf,
}

impl KeywordStore {
    /// Point at a store file, verifying it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(AppError::NotFound(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(AppError::from)
    }

    /// Read every record currently in the `keywords` table.
    pub fn read_all(&self) -> Result<Vec<KeywordRecord>> {
        let conn = self.connect()?;
        // Fails early with a shape error rather than "no such table".
        table_schema(&conn, &self.path)?;

        let mut stmt = conn.prepare("SELECT * FROM keywords")?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map([], |row| {
            let mut fields = Vec::with_capacity(column_count);
            for i in 0..column_count {
                fields.push(value_from_sql(row.get_ref(i)?));
            }
            Ok(KeywordRecord::new(fields))
        })?;

        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = records.len(), store = %self.path.display(), "read keyword records");
        Ok(records)
    }

    /// Read the store's current column layout.
    pub fn schema(&self) -> Result<TableSchema> {
        let conn = self.connect()?;
        table_schema(&conn, &self.path)
    }

    /// Apply a record batch as a single atomic unit.
    ///
    /// The schema width is read once per call, every record is adapted to
    /// it, and all rows go through one transaction: on any record-level
    /// failure nothing is applied. Returns the number of rows actually
    /// changed (insert-if-absent silently leaves existing rows alone, so
    /// this can be less than `records.len()`).
    pub fn write(&self, records: &[KeywordRecord], mode: WriteMode) -> Result<usize> {
        let mut conn = self.connect()?;
        let schema = table_schema(&conn, &self.path)?;
        let sql = insert_sql(&schema, mode);

        let tx = conn
            .transaction()
            .map_err(|source| AppError::WriteFailed { source })?;
        let mut applied = 0;
        {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|source| AppError::WriteFailed { source })?;
            for record in records {
                let adapted = schema.adapt(record);
                let params =
                    rusqlite::params_from_iter(adapted.fields().iter().map(value_to_sql));
                applied += stmt
                    .execute(params)
                    .map_err(|source| AppError::WriteFailed { source })?;
            }
        }
        tx.commit()
            .map_err(|source| AppError::WriteFailed { source })?;

        debug!(
            applied,
            total = records.len(),
            mode = ?mode,
            store = %self.path.display(),
            "applied keyword batch"
        );
        Ok(applied)
    }
}

/// Introspect the live column layout of the `keywords` table.
fn table_schema(conn: &Connection, path: &Path) -> Result<TableSchema> {
    let mut stmt = conn.prepare("PRAGMA table_info(keywords)")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if columns.is_empty() {
        return Err(AppError::NotAKeywordStore(path.to_path_buf()));
    }
    Ok(TableSchema::new(columns))
}

fn insert_sql(schema: &TableSchema, mode: WriteMode) -> String {
    let verb = match mode {
        WriteMode::InsertIfAbsent => "INSERT OR IGNORE",
        WriteMode::Overwrite => "INSERT OR REPLACE",
    };
    let columns = schema.columns().join(", ");
    let placeholders = vec!["?"; schema.width()].join(", ");
    format!("{verb} INTO keywords ({columns}) VALUES ({placeholders})")
}

fn value_from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

fn value_to_sql(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(n) => rusqlite::types::Value::Integer(*n),
        Value::Real(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
        // Rows coming from the codec or the store are always scalar; a
        // nested value is stored as its portable JSON text.
        Value::List(_) => rusqlite::types::Value::Text(value.to_portable().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sql_by_mode() {
        let schema = TableSchema::new(vec!["id".into(), "short_name".into()]);

        assert_eq!(
            insert_sql(&schema, WriteMode::InsertIfAbsent),
            "INSERT OR IGNORE INTO keywords (id, short_name) VALUES (?, ?)"
        );
        assert_eq!(
            insert_sql(&schema, WriteMode::Overwrite),
            "INSERT OR REPLACE INTO keywords (id, short_name) VALUES (?, ?)"
        );
    }

    #[test]
    fn missing_store_file_is_not_found() {
        let result = KeywordStore::open("/definitely/not/here/Web Data");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn sql_value_mapping_roundtrips() {
        let values = vec![
            Value::Null,
            Value::Integer(42),
            Value::Real(0.5),
            Value::text("google"),
            Value::blob(vec![0xde, 0xad]),
        ];
        for value in values {
            let sql = value_to_sql(&value);
            let back = value_from_sql(rusqlite::types::ValueRef::from(&sql));
            assert_eq!(back, value);
        }
    }
}
