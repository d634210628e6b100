//! History Store for copyme.
//!
//! Owns the newest-first list of clip items and the copy confirmation.
//! Every add/delete re-encodes the whole list and writes it through to the
//! key-value medium before returning. A failed write never rolls back the
//! in-memory change: the result carries the error so the caller can warn the
//! user while the store keeps working from memory.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::managers::notification::NotificationCenter;
use crate::services::clock::Clock;
use crate::services::codec;
use crate::services::rehydration::{self, Rehydration};
use crate::storage::KeyValueStore;
use crate::types::clip::ClipItem;
use crate::types::errors::PersistenceError;
use crate::types::notification::{Notification, NotificationTicket, DEFAULT_NOTIFICATION_MESSAGE};

/// Result of a mutation: the value it produced and whether it reached storage.
#[derive(Debug)]
pub struct Saved<T> {
    pub value: T,
    pub persisted: Result<(), PersistenceError>,
}

impl<T> Saved<T> {
    /// True when the mutation was written to storage.
    pub fn is_durable(&self) -> bool {
        self.persisted.is_ok()
    }

    pub fn warning(&self) -> Option<&PersistenceError> {
        self.persisted.as_ref().err()
    }
}

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    /// Prepends a new item. Returns `None`, changing nothing, when `text` is
    /// empty or whitespace only. The text is stored as given.
    fn add_item(&mut self, text: &str) -> Option<Saved<ClipItem>>;
    /// Removes the item with `id`, returning it. An unknown id is a no-op.
    fn delete_item(&mut self, id: &str) -> Saved<Option<ClipItem>>;
    /// Replaces the confirmation message and schedules its expiry.
    fn set_notification(&mut self, message: &str, duration_ms: u64) -> NotificationTicket;
    /// Applies one scheduled expiry; stale tickets do nothing.
    fn expire_notification(&mut self, ticket: NotificationTicket) -> bool;
    /// Fires every expiry that is due according to the store's clock.
    fn tick(&mut self) -> bool;
    fn items(&self) -> &[ClipItem];
    fn notification(&self) -> Notification;
}

/// History store with write-through persistence.
pub struct HistoryStore {
    items: Vec<ClipItem>,
    storage: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    storage_key: String,
    last_id: u64,
    notifications: NotificationCenter,
    rehydration: Rehydration,
}

impl HistoryStore {
    /// Builds the store and rehydrates it from `storage_key`.
    ///
    /// Never fails: unreadable or invalid stored data starts an empty history
    /// (see [`rehydration`](Self::rehydration)).
    pub fn open(
        storage: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let (items, rehydration) = rehydration::rehydrate(storage.as_ref(), &storage_key);

        let last_id = items
            .iter()
            .filter_map(|item| item.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            items,
            storage,
            clock,
            storage_key,
            last_id,
            notifications: NotificationCenter::new(DEFAULT_NOTIFICATION_MESSAGE),
            rehydration,
        }
    }

    /// Sets the message reported while no notification has been shown yet.
    pub fn with_initial_message(mut self, message: &str) -> Self {
        self.notifications = NotificationCenter::new(message);
        self
    }

    /// What rehydration found at startup.
    pub fn rehydration(&self) -> &Rehydration {
        &self.rehydration
    }

    /// Records that the configured medium could not be opened and the store
    /// was handed a stand-in.
    pub fn mark_storage_unavailable(&mut self, error: &PersistenceError) {
        self.rehydration = Rehydration::Unreadable {
            reason: error.to_string(),
        };
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&ClipItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item texts in current order joined by `separator`, or `None` when
    /// the history is empty.
    pub fn joined_text(&self, separator: &str) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        Some(
            self.items
                .iter()
                .map(|item| item.text.as_str())
                .collect::<Vec<_>>()
                .join(separator),
        )
    }

    pub fn pending_notification_timers(&self) -> usize {
        self.notifications.pending_timers()
    }

    /// Writes the current list to storage.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        let record = codec::encode(&self.items);
        match self.storage.save(&self.storage_key, &record) {
            Ok(()) => {
                debug!(key = %self.storage_key, count = self.items.len(), bytes = record.len(), "History persisted");
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "Failed to persist history, keeping it in memory");
                Err(e)
            }
        }
    }

    /// Next id: the clock in milliseconds, bumped past the last id issued and
    /// past any id already in the list. Once the numeric range is used up the
    /// id gets a `-n` suffix instead.
    fn next_id(&mut self) -> String {
        let floor = self.clock.now_millis().max(self.last_id.saturating_add(1));
        let mut candidate = Some(floor);
        while let Some(n) = candidate {
            let id = n.to_string();
            if self.get(&id).is_none() {
                self.last_id = n;
                return id;
            }
            candidate = n.checked_add(1);
        }

        (1..)
            .map(|suffix: u64| format!("{}-{}", floor, suffix))
            .find(|id| self.get(id).is_none())
            .unwrap_or_else(|| floor.to_string())
    }
}

impl HistoryStoreTrait for HistoryStore {
    fn add_item(&mut self, text: &str) -> Option<Saved<ClipItem>> {
        if text.trim().is_empty() {
            return None;
        }

        let item = ClipItem {
            id: self.next_id(),
            text: text.to_string(),
        };
        self.items.insert(0, item.clone());

        let persisted = self.persist();
        Some(Saved {
            value: item,
            persisted,
        })
    }

    fn delete_item(&mut self, id: &str) -> Saved<Option<ClipItem>> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(id, "Delete of unknown clip ignored");
            return Saved {
                value: None,
                persisted: Ok(()),
            };
        };

        let removed = self.items.remove(index);
        let persisted = self.persist();
        Saved {
            value: Some(removed),
            persisted,
        }
    }

    fn set_notification(&mut self, message: &str, duration_ms: u64) -> NotificationTicket {
        let now = self.clock.now_millis();
        self.notifications.set(message, duration_ms, now)
    }

    fn expire_notification(&mut self, ticket: NotificationTicket) -> bool {
        self.notifications.expire(ticket)
    }

    fn tick(&mut self) -> bool {
        let now = self.clock.now_millis();
        self.notifications.fire_due(now)
    }

    fn items(&self) -> &[ClipItem] {
        &self.items
    }

    fn notification(&self) -> Notification {
        self.notifications.snapshot()
    }
}
