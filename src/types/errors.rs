use thiserror::Error;

// === DecodeError ===

/// Errors produced while decoding a persisted history record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The record is not valid JSON or does not have the expected shape.
    #[error("Malformed history record: {0}")]
    Malformed(String),
    /// The record carries a version tag this build cannot read.
    #[error("Unsupported history record version: {0}")]
    UnsupportedVersion(u64),
    /// Two items in the record share the same id.
    #[error("Duplicate clip id in history record: {0}")]
    DuplicateId(String),
}

// === PersistenceError ===

/// Errors raised by a key-value storage medium.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The medium refused the write because it is full.
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),
    /// The medium refused access (read-only, locked down, permissions).
    #[error("Storage access denied: {0}")]
    AccessDenied(String),
    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

// === ClipboardError ===

/// Errors raised while writing to the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard could be opened on this platform or session.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    /// The platform refused clipboard access.
    #[error("Clipboard permission denied: {0}")]
    PermissionDenied(String),
    /// The write itself failed.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
    /// The requested item does not exist.
    #[error("Clip not found: {0}")]
    NotFound(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === AppError ===

/// Errors that can stop the application from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] PersistenceError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
