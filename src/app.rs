//! App Core for copyme.
//!
//! Wires settings, storage, clock and clipboard into one history store and
//! implements the UI-level flows on top of it (trimmed input, copy one,
//! copy all, storage usage).

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait, Saved};
use crate::platform;
use crate::services::clipboard::{self, ClipboardWriter};
use crate::services::clock::{Clock, SystemClock};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::storage_usage::{self, StorageUsage};
use crate::storage::{KeyValueStore, MemoryStorage, SqliteStorage};
use crate::types::clip::ClipItem;
use crate::types::errors::{AppError, ClipboardError, PersistenceError};
use crate::types::notification::NotificationTicket;
use crate::types::settings::{CopyMeSettings, StorageBackend, StorageSettings};

/// Text to put on the clipboard and the confirmation to show afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub text: String,
    pub message: String,
}

/// A completed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copied {
    pub message: String,
    pub ticket: NotificationTicket,
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub store: HistoryStore,
    clipboard: Arc<dyn ClipboardWriter>,
}

impl App {
    /// Assembles an app from explicit parts. The storage key and initial
    /// notification message come from the engine's current settings.
    pub fn new(
        settings_engine: SettingsEngine,
        storage: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let settings = settings_engine.get_settings();
        let store = HistoryStore::open(storage, clock, settings.storage.key.clone())
            .with_initial_message(&settings.notification.default_message);

        Self {
            settings_engine,
            store,
            clipboard,
        }
    }

    /// Startup sequence: load settings, open the configured storage,
    /// rehydrate the history, pick the configured clipboard.
    ///
    /// Only unreadable settings stop startup. When the configured storage
    /// cannot be opened the history runs from memory and the store reports
    /// [`Rehydration::Unreadable`](crate::services::rehydration::Rehydration::Unreadable).
    pub fn open(config_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;

        let (storage, open_error) = match open_storage(&settings.storage) {
            Ok(storage) => (storage, None),
            Err(e) => {
                warn!(error = %e, "Could not open history storage, keeping history in memory");
                (Box::new(MemoryStorage::new()) as Box<dyn KeyValueStore>, Some(e))
            }
        };
        let clipboard = clipboard::from_backend(settings.clipboard.backend);

        let mut app = Self::new(
            settings_engine,
            storage,
            Arc::new(SystemClock),
            clipboard,
        );
        if let Some(e) = open_error {
            app.store.mark_storage_unavailable(&e);
        }
        Ok(app)
    }

    pub fn settings(&self) -> &CopyMeSettings {
        self.settings_engine.get_settings()
    }

    pub fn clipboard(&self) -> Arc<dyn ClipboardWriter> {
        Arc::clone(&self.clipboard)
    }

    /// Adds form input: surrounding whitespace is trimmed and blank input is ignored.
    pub fn add_clip(&mut self, input: &str) -> Option<Saved<ClipItem>> {
        self.store.add_item(input.trim())
    }

    pub fn delete_clip(&mut self, id: &str) -> Saved<Option<ClipItem>> {
        self.store.delete_item(id)
    }

    /// Prepares copying one item.
    pub fn item_copy_request(&self, id: &str) -> Result<CopyRequest, ClipboardError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| ClipboardError::NotFound(id.to_string()))?;
        let preview = item.preview(self.settings().clipboard.preview_chars);
        Ok(CopyRequest {
            text: item.text.clone(),
            message: format!("Copied: \"{}\"", preview),
        })
    }

    /// Prepares copying every item; `None` when the history is empty.
    pub fn copy_all_request(&self) -> Option<CopyRequest> {
        let text = self
            .store
            .joined_text(&self.settings().clipboard.copy_all_separator)?;
        Some(CopyRequest {
            text,
            message: format!("Copied all {} items!", self.store.len()),
        })
    }

    /// Shows the confirmation for a finished copy for the configured duration.
    pub fn confirm_copy(&mut self, request: &CopyRequest) -> Copied {
        let duration_ms = self.settings().notification.duration_ms;
        let ticket = self.store.set_notification(&request.message, duration_ms);
        Copied {
            message: request.message.clone(),
            ticket,
        }
    }

    /// Copies one item and shows the confirmation. On failure no
    /// confirmation is shown and the history is untouched.
    pub async fn copy_item(&mut self, id: &str) -> Result<Copied, ClipboardError> {
        let request = self.item_copy_request(id)?;
        clipboard::write_text(self.clipboard(), request.text.clone()).await?;
        Ok(self.confirm_copy(&request))
    }

    /// Copies all items joined by the configured separator.
    /// Does nothing and returns `Ok(None)` when the history is empty.
    pub async fn copy_all(&mut self) -> Result<Option<Copied>, ClipboardError> {
        let Some(request) = self.copy_all_request() else {
            return Ok(None);
        };
        clipboard::write_text(self.clipboard(), request.text.clone()).await?;
        Ok(Some(self.confirm_copy(&request)))
    }

    pub fn storage_usage(&self) -> Result<StorageUsage, PersistenceError> {
        storage_usage::measure(self.store.storage(), self.store.storage_key())
    }
}

/// Opens the key-value medium selected in settings.
pub fn open_storage(settings: &StorageSettings) -> Result<Box<dyn KeyValueStore>, PersistenceError> {
    match settings.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        StorageBackend::Sqlite => {
            let path: PathBuf = settings
                .database_path
                .clone()
                .map(Into::into)
                .unwrap_or_else(platform::default_database_path);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    PersistenceError::AccessDenied(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            Ok(Box::new(SqliteStorage::open(&path)?))
        }
    }
}
