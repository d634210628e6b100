//! Startup guard that turns whatever is in storage into a safe initial history.
//!
//! The guard never fails: a missing record, an unreadable medium and a record
//! that does not decode all start the store with an empty list. The outcome is
//! reported so the caller can tell the user what happened.

use serde::Serialize;
use tracing::{info, warn};

use crate::services::codec;
use crate::storage::KeyValueStore;
use crate::types::clip::ClipItem;

/// What the guard found in storage at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Rehydration {
    /// Nothing was stored under the key.
    Empty,
    /// A valid record was adopted.
    Restored { count: usize },
    /// A record was present but did not decode; the history starts empty.
    Discarded { reason: String },
    /// The medium could not be read; the history starts empty.
    Unreadable { reason: String },
}

impl Rehydration {
    /// True when stored data was thrown away or could not be read.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Rehydration::Discarded { .. } | Rehydration::Unreadable { .. })
    }
}

/// Loads, decodes and validates the record under `key`.
pub fn rehydrate(storage: &dyn KeyValueStore, key: &str) -> (Vec<ClipItem>, Rehydration) {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!(key, "No stored history, starting empty");
            return (Vec::new(), Rehydration::Empty);
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read stored history, starting empty");
            return (
                Vec::new(),
                Rehydration::Unreadable {
                    reason: e.to_string(),
                },
            );
        }
    };

    match codec::decode(&raw) {
        Ok(items) => {
            info!(key, count = items.len(), "Restored clipboard history");
            let count = items.len();
            (items, Rehydration::Restored { count })
        }
        Err(e) => {
            warn!(key, error = %e, "Stored history is not in the expected format, clearing");
            (
                Vec::new(),
                Rehydration::Discarded {
                    reason: e.to_string(),
                },
            )
        }
    }
}
