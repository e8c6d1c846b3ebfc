//! Backup file IO.
//!
//! The backup is a UTF-8 JSON text file (default `engines.json`) holding
//! one record batch in the engine's portable form. The path is always an
//! explicit parameter; there is no shared current-backup state.

use crate::error::{AppError, Result};
use searchsync_engine::{codec, KeywordRecord};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and decode a backup file.
///
/// A missing file is `NotFound`; unparseable content is the engine's
/// malformed-data error; a file that parses to zero records is
/// `EmptyBackup`, which is a normal (if unhelpful) result rather than
/// corruption.
pub fn read_backup(path: &Path) -> Result<Vec<KeywordRecord>> {
    // Absent and unreadable files surface the same way: the user has to
    // point at a different file either way. Non-UTF-8 content is corruption,
    // not absence.
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(AppError::Engine(searchsync_engine::Error::MalformedData(
                "backup file is not valid UTF-8".into(),
            )))
        }
        Err(_) => return Err(AppError::NotFound(path.to_path_buf())),
    };
    let records = codec::decode_batch(&text)?;
    if records.is_empty() {
        return Err(AppError::EmptyBackup(path.to_path_buf()));
    }
    debug!(count = records.len(), backup = %path.display(), "read backup");
    Ok(records)
}

/// Encode a record batch and write it to `path`, replacing any previous
/// content.
pub fn write_backup(path: &Path, records: &[KeywordRecord]) -> Result<()> {
    let text = codec::encode_batch(records)?;
    fs::write(path, text)?;
    debug!(count = records.len(), backup = %path.display(), "wrote backup");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchsync_engine::Value;

    fn sample() -> Vec<KeywordRecord> {
        vec![KeywordRecord::new(vec![
            Value::Integer(1),
            Value::text("Google"),
            Value::text("google"),
            Value::Null,
            Value::text("https://google.com/search?q={searchTerms}"),
        ])]
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engines.json");

        write_backup(&path, &sample()).unwrap();
        let back = read_backup(&path).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engines.json");

        let result = read_backup(&path);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn garbage_content_is_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        fs::write(&path, "not a backup").unwrap();

        let result = read_backup(&path);
        assert!(matches!(result, Err(AppError::Engine(_))));
    }

    #[test]
    fn non_utf8_content_is_malformed_not_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let result = read_backup(&path);
        assert!(matches!(result, Err(AppError::Engine(_))));
    }

    #[test]
    fn zero_records_is_empty_backup_not_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engines.json");
        fs::write(&path, "[]").unwrap();

        let result = read_backup(&path);
        assert!(matches!(result, Err(AppError::EmptyBackup(_))));
    }
}
