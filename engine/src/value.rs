//! Typed field values for keyword store rows.
//!
//! A [`Value`] is the tagged variant every portable-form traversal recurses
//! over. Rows read from the store are lists of scalar values; a backup batch
//! is a list of rows. Modeling the nesting inside the variant itself keeps
//! the conversion exhaustive: one recursive walk handles a standalone field,
//! a row, and a whole row collection.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key used to tag binary values in the portable JSON form.
///
/// Raw bytes (e.g. icon hashes) have no native JSON representation, so they
/// are wrapped as `{"$blob": "<base64>"}` on encode and unwrapped on decode.
const BLOB_TAG: &str = "$blob";

/// A single field value, mirroring SQLite's storage classes plus nesting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    /// A nested collection of values (a row, or a batch of rows).
    List(Vec<Value>),
}

impl Value {
    /// Convenience constructor for text values.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Convenience constructor for blob values.
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Blob(bytes.into())
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the integer content, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value is a scalar (anything but a list).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_))
    }

    /// Convert to the portable JSON form.
    ///
    /// Scalars map directly; blobs become a tagged base64 object; lists
    /// recurse element-wise.
    pub fn to_portable(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Real(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Blob(bytes) => {
                serde_json::json!({ BLOB_TAG: BASE64.encode(bytes) })
            }
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_portable).collect())
            }
        }
    }

    /// Convert back from the portable JSON form.
    ///
    /// Any JSON value that is not a valid instance of the portable format
    /// (an object that is not a blob tag, a malformed base64 payload) is
    /// rejected as malformed data.
    pub fn from_portable(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Real(f))
                } else {
                    Err(Error::MalformedData(format!("unrepresentable number: {n}")))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_portable)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            serde_json::Value::Object(map) => {
                let encoded = map
                    .get(BLOB_TAG)
                    .and_then(|v| v.as_str())
                    .filter(|_| map.len() == 1)
                    .ok_or_else(|| {
                        Error::MalformedData("object is not a tagged blob".to_string())
                    })?;
                let bytes = BASE64
                    .decode(encoded)
                    .map_err(|e| Error::MalformedData(format!("invalid base64 blob: {e}")))?;
                Ok(Value::Blob(bytes))
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Blob(bytes) => write!(f, "{}", BASE64.encode(bytes)),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Blob(bytes)
    }
}

// Serde serialization goes through the portable form, so any container
// holding values serializes to the same shape the backup codec produces.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_portable().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::from_portable(&json).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_pass_through() {
        assert_eq!(Value::Null.to_portable(), json!(null));
        assert_eq!(Value::Integer(42).to_portable(), json!(42));
        assert_eq!(Value::Real(1.5).to_portable(), json!(1.5));
        assert_eq!(Value::text("google").to_portable(), json!("google"));
    }

    #[test]
    fn blob_is_tagged_base64() {
        let value = Value::blob(b"hash".to_vec());
        assert_eq!(value.to_portable(), json!({"$blob": "aGFzaA=="}));

        let back = Value::from_portable(&json!({"$blob": "aGFzaA=="})).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn list_recurses() {
        let row = Value::List(vec![
            Value::Integer(1),
            Value::text("Google"),
            Value::blob(vec![0xde, 0xad]),
        ]);
        let portable = row.to_portable();
        assert_eq!(portable, json!([1, "Google", {"$blob": "3q0="}]));
        assert_eq!(Value::from_portable(&portable).unwrap(), row);
    }

    #[test]
    fn nested_lists_recurse() {
        let batch = Value::List(vec![
            Value::List(vec![Value::Integer(1), Value::text("a")]),
            Value::List(vec![Value::Integer(2), Value::Null]),
        ]);
        let portable = batch.to_portable();
        assert_eq!(Value::from_portable(&portable).unwrap(), batch);
    }

    #[test]
    fn untagged_object_is_malformed() {
        let result = Value::from_portable(&json!({"url": "https://example.com"}));
        assert!(matches!(result, Err(Error::MalformedData(_))));
    }

    #[test]
    fn object_with_extra_keys_is_malformed() {
        let result = Value::from_portable(&json!({"$blob": "aGFzaA==", "extra": 1}));
        assert!(matches!(result, Err(Error::MalformedData(_))));
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let result = Value::from_portable(&json!({"$blob": "not base64!!"}));
        assert!(matches!(result, Err(Error::MalformedData(_))));
    }

    #[test]
    fn bool_coerces_to_integer() {
        assert_eq!(Value::from_portable(&json!(true)).unwrap(), Value::Integer(1));
        assert_eq!(Value::from_portable(&json!(false)).unwrap(), Value::Integer(0));
    }

    #[test]
    fn display_renders_scalars() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::text("bing").to_string(), "bing");
        assert_eq!(Value::blob(b"hash".to_vec()).to_string(), "aGFzaA==");
    }

    #[test]
    fn serde_roundtrip_through_portable_form() {
        let value = Value::List(vec![Value::text("x"), Value::blob(vec![1, 2, 3])]);
        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }
}
