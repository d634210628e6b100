//! "Check storage" support: how many bytes the history record occupies.

use serde::Serialize;

use crate::storage::KeyValueStore;
use crate::types::errors::PersistenceError;

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageUsage {
    pub key: String,
    pub bytes: u64,
    pub formatted: String,
}

/// Measures the UTF-8 size of the value stored under `key` (0 when absent).
pub fn measure(storage: &dyn KeyValueStore, key: &str) -> Result<StorageUsage, PersistenceError> {
    let bytes = storage.load(key)?.map(|v| v.len() as u64).unwrap_or(0);
    Ok(StorageUsage {
        key: key.to_string(),
        bytes,
        formatted: format_bytes(bytes, 2),
    })
}

/// Formats a byte count with 1024-based units, trimming trailing zeros
/// (`1536` → `"1.5 KB"`, `0` → `"0 Bytes"`).
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let mut number = format!("{:.*}", decimals, value);
    if number.contains('.') {
        number = number.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{} {}", number, UNITS[unit])
}
