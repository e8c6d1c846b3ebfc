//! Keyword records: one row of a browser's `keywords` table.
//!
//! A record is an ordered, fixed-position tuple of field values. Column
//! positions for the leading fields are stable across known store versions
//! because stores only ever append trailing columns; everything past the
//! named positions is carried through opaquely.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Positions of the fields the resolver understands.
///
/// Valid for every known store version; the trailing columns (flags,
/// timestamps, sync identifiers, hashes) vary by version and are never
/// interpreted.
pub mod column {
    pub const ID: usize = 0;
    pub const SHORT_NAME: usize = 1;
    pub const KEYWORD: usize = 2;
    pub const FAVICON_URL: usize = 3;
    pub const URL: usize = 4;
    pub const SUGGEST_URL: usize = 10;
}

/// One search-engine definition, as an ordered list of field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordRecord {
    fields: Vec<Value>,
}

impl KeywordRecord {
    /// Create a record from its field values, in store column order.
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }

    /// Number of fields this record carries.
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field at `index`, or [`Value::Null`] if the record is narrower.
    ///
    /// Missing trailing fields and explicit nulls are indistinguishable,
    /// which matches how the schema adapter pads them on write.
    pub fn field(&self, index: usize) -> &Value {
        self.fields.get(index).unwrap_or(&Value::Null)
    }

    fn text_at(&self, index: usize) -> Option<&str> {
        self.field(index).as_text()
    }

    /// Store-assigned numeric identity, if present.
    pub fn id(&self) -> Option<i64> {
        self.field(column::ID).as_integer()
    }

    pub fn short_name(&self) -> Option<&str> {
        self.text_at(column::SHORT_NAME)
    }

    /// Display name, falling back to "Unknown" when empty or absent.
    pub fn display_name(&self) -> &str {
        match self.short_name() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown",
        }
    }

    /// The shortcut/trigger string. May be empty.
    pub fn keyword(&self) -> Option<&str> {
        self.text_at(column::KEYWORD)
    }

    pub fn favicon_url(&self) -> Option<&str> {
        self.text_at(column::FAVICON_URL)
    }

    pub fn url(&self) -> Option<&str> {
        self.text_at(column::URL)
    }

    pub fn suggest_url(&self) -> Option<&str> {
        self.text_at(column::SUGGEST_URL)
    }
}

impl From<Vec<Value>> for KeywordRecord {
    fn from(fields: Vec<Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google() -> KeywordRecord {
        KeywordRecord::new(vec![
            Value::Integer(1),
            Value::text("Google"),
            Value::text("google"),
            Value::text("https://google.com/favicon.ico"),
            Value::text("https://google.com/search?q={searchTerms}"),
            Value::Integer(1),
            Value::text(""),
            Value::Integer(0),
            Value::Integer(0),
            Value::text("UTF-8"),
            Value::text("https://google.com/complete/search?q={searchTerms}"),
        ])
    }

    #[test]
    fn named_field_accessors() {
        let record = google();
        assert_eq!(record.id(), Some(1));
        assert_eq!(record.short_name(), Some("Google"));
        assert_eq!(record.keyword(), Some("google"));
        assert_eq!(record.favicon_url(), Some("https://google.com/favicon.ico"));
        assert_eq!(
            record.url(),
            Some("https://google.com/search?q={searchTerms}")
        );
        assert_eq!(
            record.suggest_url(),
            Some("https://google.com/complete/search?q={searchTerms}")
        );
    }

    #[test]
    fn display_name_falls_back_to_unknown() {
        let unnamed = KeywordRecord::new(vec![Value::Integer(1), Value::text("")]);
        assert_eq!(unnamed.display_name(), "Unknown");

        let absent = KeywordRecord::new(vec![Value::Integer(1), Value::Null]);
        assert_eq!(absent.display_name(), "Unknown");

        let short = KeywordRecord::new(vec![Value::Integer(1)]);
        assert_eq!(short.display_name(), "Unknown");

        assert_eq!(google().display_name(), "Google");
    }

    #[test]
    fn missing_fields_read_as_null() {
        let record = KeywordRecord::new(vec![Value::Integer(1)]);
        assert!(record.field(column::SUGGEST_URL).is_null());
        assert_eq!(record.suggest_url(), None);
    }

    #[test]
    fn non_text_field_is_not_a_keyword() {
        let record = KeywordRecord::new(vec![
            Value::Integer(1),
            Value::text("Name"),
            Value::Integer(42),
        ]);
        assert_eq!(record.keyword(), None);
    }

    #[test]
    fn serde_is_transparent_over_fields() {
        let record = google();
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.starts_with('['));
        let back: KeywordRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
