//! Deep merge of config documents
//!
//! - Objects: merged key by key, recursively
//! - Arrays: replaced wholesale by the overlay
//! - Scalars and null: replaced by the overlay

use crate::Document;
use serde_json::Value;

/// Merge `overlay` on top of `base`, returning a new document.
///
/// Neither input is modified. Keys present in both sides merge recursively
/// when both values are objects; otherwise the overlay value wins.
pub fn merge(base: &Document, overlay: &Document) -> Document {
    let mut out = base.clone();
    for (key, overlay_value) in overlay {
        let merged = match out.get(key) {
            Some(base_value) => merge_value(base_value, overlay_value),
            None => overlay_value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

/// Merge two values with the same rules as [`merge`].
pub fn merge_value(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}
