use serde::Serialize;

/// How long a copy confirmation stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_MS: u64 = 2500;

/// Message shown before any copy has happened.
pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "Copied to clipboard!";

/// Read-only view of the transient copy confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub active: bool,
}

/// Handle for one scheduled expiry.
///
/// An expiry only hides the notification if `generation` still matches the
/// notification that is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationTicket {
    pub generation: u64,
    pub due_at_ms: u64,
}
