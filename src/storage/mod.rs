//! Key-value persistence adapters.
//!
//! The history is stored as one string blob under one key, the same way a
//! browser's local storage holds it. Anything that can read and write such
//! blobs synchronously can back the store.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::types::errors::PersistenceError;

/// Synchronous string key-value medium.
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` when there is none.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
