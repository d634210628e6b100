//! JSON encoding of the persisted history record.
//!
//! Canonical layout (version 1):
//!
//! ```json
//! {"items":[{"id":"1718000000000","text":"hello"}],"version":1}
//! ```
//!
//! The legacy layout written by the original web widget,
//! `{"state":{"history":[...]},"version":0}`, is still accepted on decode.
//! Decoding is all-or-nothing: either every item validates or the whole
//! record is rejected.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::types::clip::ClipItem;
use crate::types::errors::DecodeError;

/// Version written by [`encode`].
pub const FORMAT_VERSION: u64 = 1;

const LEGACY_VERSION: u64 = 0;

/// On-disk shape of a version 1 record. Field order is the output order.
#[derive(Serialize)]
struct Record<'a> {
    items: &'a [ClipItem],
    version: u64,
}

/// Encodes `items` as a version 1 record. Output is a pure function of the input.
pub fn encode(items: &[ClipItem]) -> String {
    let record = Record {
        items,
        version: FORMAT_VERSION,
    };
    // Only strings and an integer: serialization cannot fail.
    serde_json::to_string(&record).unwrap_or_default()
}

/// Decodes a persisted record into its items, preserving their order.
pub fn decode(raw: &str) -> Result<Vec<ClipItem>, DecodeError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| DecodeError::Malformed(format!("invalid JSON: {}", e)))?;

    let record = value
        .as_object()
        .ok_or_else(|| DecodeError::Malformed("record is not an object".to_string()))?;

    let version = match record.get("version") {
        Some(v) => v
            .as_u64()
            .ok_or_else(|| DecodeError::Malformed(format!("invalid version tag: {}", v)))?,
        None => return Err(DecodeError::Malformed("missing version tag".to_string())),
    };

    let items = match version {
        FORMAT_VERSION => record
            .get("items")
            .ok_or_else(|| DecodeError::Malformed("missing 'items'".to_string()))?,
        LEGACY_VERSION => record
            .get("state")
            .and_then(|state| state.get("history"))
            .ok_or_else(|| DecodeError::Malformed("missing 'state.history'".to_string()))?,
        other => return Err(DecodeError::UnsupportedVersion(other)),
    };

    validate_items(items)
}

/// Checks that `value` is an array of `{id: string, text: string}` objects
/// with distinct ids. Extra fields on an item are ignored.
fn validate_items(value: &Value) -> Result<Vec<ClipItem>, DecodeError> {
    let elements = value
        .as_array()
        .ok_or_else(|| DecodeError::Malformed("items is not a sequence".to_string()))?;

    let mut seen = HashSet::with_capacity(elements.len());
    let mut items = Vec::with_capacity(elements.len());

    for (index, element) in elements.iter().enumerate() {
        let id = string_field(element, "id", index)?;
        let text = string_field(element, "text", index)?;
        if !seen.insert(id.clone()) {
            return Err(DecodeError::DuplicateId(id));
        }
        items.push(ClipItem { id, text });
    }

    Ok(items)
}

fn string_field(element: &Value, field: &str, index: usize) -> Result<String, DecodeError> {
    let obj = element
        .as_object()
        .ok_or_else(|| DecodeError::Malformed(format!("item {} is not an object", index)))?;
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeError::Malformed(format!(
            "item {} has a non-string '{}'",
            index, field
        ))),
        None => Err(DecodeError::Malformed(format!(
            "item {} is missing '{}'",
            index, field
        ))),
    }
}
