//! Config documents and JSON parsing

use crate::{Error, Result};
use serde_json::{Map, Value};

/// One layer of configuration: a JSON object
pub type Document = Map<String, Value>;

/// Key holding a document's parent references
pub const EXTENDS_KEY: &str = "extends";

/// Parse JSON text into a [`Document`].
///
/// Fails with [`Error::InvalidJson`] on malformed text and
/// [`Error::NotAnObject`] when the top-level value is not an object.
pub fn parse_document(text: &str) -> Result<Document> {
    let value: Value = serde_json::from_str(text).map_err(|source| Error::InvalidJson { source })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::NotAnObject {
            found: value_kind(&other),
        }),
    }
}

/// Short name of a value's JSON type, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
