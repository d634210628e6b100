//! Copy-confirmation state with generation-checked expiry.
//!
//! Every call to [`NotificationCenter::set`] bumps a generation counter and
//! schedules an expiry tagged with it. Expiries are never cancelled; when one
//! fires it only hides the notification if its generation is still the
//! current one, so a stale timer cannot hide a newer message.

use crate::types::notification::{Notification, NotificationTicket};

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    message: String,
    active: bool,
    generation: u64,
    timers: Vec<NotificationTicket>,
}

impl NotificationCenter {
    pub fn new(initial_message: impl Into<String>) -> Self {
        Self {
            message: initial_message.into(),
            active: false,
            generation: 0,
            timers: Vec::new(),
        }
    }

    /// Shows `message` until `now_ms + duration_ms`.
    pub fn set(&mut self, message: &str, duration_ms: u64, now_ms: u64) -> NotificationTicket {
        self.generation += 1;
        self.message = message.to_string();
        self.active = true;

        let ticket = NotificationTicket {
            generation: self.generation,
            due_at_ms: now_ms.saturating_add(duration_ms),
        };
        self.timers.push(ticket);
        ticket
    }

    /// Applies one expiry. Returns `true` if it hid the notification.
    pub fn expire(&mut self, ticket: NotificationTicket) -> bool {
        self.timers.retain(|t| *t != ticket);
        if self.active && ticket.generation == self.generation {
            self.active = false;
            return true;
        }
        false
    }

    /// Fires every scheduled expiry due at or before `now_ms`, oldest first.
    /// Returns `true` if the notification was hidden.
    pub fn fire_due(&mut self, now_ms: u64) -> bool {
        let mut due: Vec<NotificationTicket> = self
            .timers
            .iter()
            .copied()
            .filter(|t| t.due_at_ms <= now_ms)
            .collect();
        due.sort_by_key(|t| t.due_at_ms);

        let mut hidden = false;
        for ticket in due {
            hidden |= self.expire(ticket);
        }
        hidden
    }

    pub fn snapshot(&self) -> Notification {
        Notification {
            message: self.message.clone(),
            active: self.active,
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
