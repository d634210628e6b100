use serde::{Deserialize, Serialize};

use super::notification::{DEFAULT_NOTIFICATION_MESSAGE, DEFAULT_NOTIFICATION_MS};

/// Storage key used by the original web widget; kept so exported records line up.
pub const DEFAULT_STORAGE_KEY: &str = "copyMeClipboardHistory";

/// Separator placed between item texts by "copy all".
pub const DEFAULT_COPY_ALL_SEPARATOR: &str = "\n\n---\n\n";

/// Top-level settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CopyMeSettings {
    pub storage: StorageSettings,
    pub notification: NotificationSettings,
    pub clipboard: ClipboardSettings,
}

/// Where and under which key the history is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    pub key: String,
    pub backend: StorageBackend,
    /// SQLite file; falls back to the platform data directory when unset.
    pub database_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            backend: StorageBackend::Sqlite,
            database_path: None,
        }
    }
}

/// Which key-value medium backs the history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

/// Copy-confirmation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationSettings {
    pub duration_ms: u64,
    pub default_message: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_NOTIFICATION_MS,
            default_message: DEFAULT_NOTIFICATION_MESSAGE.to_string(),
        }
    }
}

/// System clipboard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClipboardSettings {
    pub backend: ClipboardBackend,
    pub copy_all_separator: String,
    /// Characters of an item shown in the "Copied: ..." confirmation.
    pub preview_chars: usize,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            backend: ClipboardBackend::System,
            copy_all_separator: DEFAULT_COPY_ALL_SEPARATOR.to_string(),
            preview_chars: 30,
        }
    }
}

/// Which clipboard the copy commands write to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClipboardBackend {
    System,
    Memory,
}
