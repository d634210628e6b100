//! Write-only access to a clipboard.
//!
//! [`SystemClipboard`] talks to the OS clipboard through `arboard`. Platform
//! clipboard calls can block (X11 selection ownership, macOS pasteboard), so
//! [`write_text`] runs them on the blocking pool and the caller only awaits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::types::errors::ClipboardError;
use crate::types::settings::ClipboardBackend;

/// Something text can be copied into.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
        clipboard
            .set_text(text.to_owned())
            .map_err(map_arboard_error)
    }
}

fn map_arboard_error(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(e.to_string()),
        arboard::Error::ClipboardOccupied => ClipboardError::PermissionDenied(e.to_string()),
        other => ClipboardError::WriteFailed(other.to_string()),
    }
}

/// Process-local clipboard, used headless and in tests.
///
/// Clones share contents. `deny()` makes writes fail the way a browser does
/// when clipboard permission is refused.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    denied: Arc<AtomicBool>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(&self, denied: bool) {
        self.denied.store(denied, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.denied.load(Ordering::SeqCst) {
            return Err(ClipboardError::PermissionDenied(
                "clipboard write not allowed".to_string(),
            ));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Builds the clipboard selected in settings.
pub fn from_backend(backend: ClipboardBackend) -> Arc<dyn ClipboardWriter> {
    match backend {
        ClipboardBackend::System => Arc::new(SystemClipboard),
        ClipboardBackend::Memory => Arc::new(MemoryClipboard::new()),
    }
}

/// Writes `text` without blocking the async caller.
pub async fn write_text(
    clipboard: Arc<dyn ClipboardWriter>,
    text: String,
) -> Result<(), ClipboardError> {
    let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
        .await
        .map_err(|e| ClipboardError::WriteFailed(format!("clipboard task failed: {}", e)))?;

    if let Err(ref e) = result {
        warn!(error = %e, "Clipboard write failed");
    }
    result
}
