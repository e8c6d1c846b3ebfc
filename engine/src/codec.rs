//! Portable backup codec.
//!
//! A backup is a nested array-of-arrays: one outer array of rows, each row
//! an array of scalar field values, binary values tagged as base64 text.
//! Encoding and decoding are a lossless round-trip pair for any record
//! batch, including batches with blob fields.

use crate::error::{Error, Result};
use crate::record::KeywordRecord;
use crate::value::Value;

/// Serialize a record batch to the portable text form.
///
/// Output is pretty-printed with stable indentation so backups diff
/// cleanly under version control.
pub fn encode_batch(records: &[KeywordRecord]) -> Result<String> {
    let rows = Value::List(
        records
            .iter()
            .map(|r| Value::List(r.fields().to_vec()))
            .collect(),
    );
    serde_json::to_string_pretty(&rows.to_portable())
        .map_err(|e| Error::MalformedData(e.to_string()))
}

/// Parse a record batch from the portable text form.
///
/// Tolerates any valid instance of the format. Everything else (invalid
/// JSON, a non-array document, a non-array row, a nested list inside a
/// row) is malformed data.
pub fn decode_batch(text: &str) -> Result<Vec<KeywordRecord>> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::MalformedData(e.to_string()))?;
    let value = Value::from_portable(&json)?;

    let rows = match value {
        Value::List(rows) => rows,
        other => {
            return Err(Error::MalformedData(format!(
                "expected an array of rows, got {other}"
            )))
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::List(fields) => {
                if let Some(nested) = fields.iter().find(|f| !f.is_scalar()) {
                    return Err(Error::MalformedData(format!(
                        "row {i} contains a nested value: {nested}"
                    )));
                }
                Ok(KeywordRecord::new(fields))
            }
            other => Err(Error::MalformedData(format!(
                "row {i} is not an array: {other}"
            ))),
        })
        .collect()
}
