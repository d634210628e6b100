//! RPC method handler for the copyme JSON-lines bridge.
//!
//! Kept apart from `rpc_server.rs` so every method can be unit-tested.
//! The store lock is never held across a clipboard write: copy methods read
//! the text under the lock, release it, write, then lock again to show the
//! confirmation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::app::App;
use crate::managers::history_store::HistoryStoreTrait;
use crate::services::clipboard;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::PersistenceError;
use crate::types::notification::NotificationTicket;

/// Shared state for all in-flight requests.
#[derive(Clone)]
pub struct RpcContext {
    pub app: Arc<Mutex<App>>,
    events: mpsc::UnboundedSender<Value>,
}

impl RpcContext {
    /// Wraps `app`. Responses and events sent through [`emit`](Self::emit)
    /// come out of the returned receiver in order.
    pub fn new(app: App) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (events, rx) = mpsc::unbounded_channel();
        let ctx = Self {
            app: Arc::new(Mutex::new(app)),
            events,
        };
        (ctx, rx)
    }

    pub fn emit(&self, message: Value) {
        // Only fails once the writer is gone, at which point nobody is listening.
        let _ = self.events.send(message);
    }

    /// Hides the notification after `duration_ms` unless a newer one replaced it.
    pub fn schedule_expiry(&self, ticket: NotificationTicket, duration_ms: u64) {
        let ctx = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
            let hidden = ctx.app.lock().await.store.expire_notification(ticket);
            if hidden {
                ctx.emit(json!({"event": "notification.expired", "generation": ticket.generation}));
            } else {
                debug!(generation = ticket.generation, "Stale notification expiry ignored");
            }
        });
    }
}

/// Requests currently being handled.
///
/// Each request runs as its own task and emits its response when done.
/// Finished tasks are reaped whenever a new request is dispatched.
#[derive(Default)]
pub struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts handling one parsed request line.
    pub fn dispatch(&mut self, ctx: &RpcContext, req: Value) {
        while self.tasks.try_join_next().is_some() {}

        let ctx = ctx.clone();
        self.tasks.spawn(async move {
            let id = req.get("id").cloned().unwrap_or(Value::Null);
            let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
            let params = req.get("params").cloned().unwrap_or(json!({}));

            let response = match handle_method(&ctx, method, &params).await {
                Ok(val) => json!({"id": id, "result": val}),
                Err(err) => {
                    warn!(method, error = %err, "RPC call failed");
                    json!({"id": id, "error": err})
                }
            };
            ctx.emit(response);
        });
    }

    /// Tasks not yet reaped, finished or not.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every outstanding request.
    pub async fn drain(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }
}

fn warning_json(warning: Option<&PersistenceError>) -> Value {
    match warning {
        Some(e) => json!(e.to_string()),
        None => Value::Null,
    }
}

/// Dispatch one method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(ctx: &RpcContext, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        "app.status" => {
            let a = ctx.app.lock().await;
            Ok(json!({
                "version": env!("CARGO_PKG_VERSION"),
                "storage_key": a.store.storage_key(),
                "rehydration": a.store.rehydration(),
                "count": a.store.len(),
            }))
        }

        // ─── History ───
        "history.list" => {
            let a = ctx.app.lock().await;
            Ok(json!({"items": a.store.items()}))
        }
        "history.add" => {
            let text = params.get("text").and_then(|v| v.as_str()).ok_or("missing text")?;
            let mut a = ctx.app.lock().await;
            match a.add_clip(text) {
                Some(saved) => Ok(json!({
                    "item": saved.value,
                    "persisted": saved.is_durable(),
                    "warning": warning_json(saved.warning()),
                })),
                None => Ok(json!({"item": null, "persisted": true, "warning": null})),
            }
        }
        "history.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = ctx.app.lock().await;
            let saved = a.delete_clip(id);
            Ok(json!({
                "removed": saved.value.is_some(),
                "persisted": saved.is_durable(),
                "warning": warning_json(saved.warning()),
            }))
        }
        "history.copy" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let (request, writer) = {
                let a = ctx.app.lock().await;
                (a.item_copy_request(id).map_err(|e| e.to_string())?, a.clipboard())
            };
            clipboard::write_text(writer, request.text.clone())
                .await
                .map_err(|e| e.to_string())?;

            let (copied, duration_ms) = {
                let mut a = ctx.app.lock().await;
                let copied = a.confirm_copy(&request);
                (copied, a.settings().notification.duration_ms)
            };
            ctx.schedule_expiry(copied.ticket, duration_ms);
            Ok(json!({"message": copied.message, "generation": copied.ticket.generation}))
        }
        "history.copy_all" => {
            let (request, count, writer) = {
                let a = ctx.app.lock().await;
                (a.copy_all_request(), a.store.len(), a.clipboard())
            };
            let Some(request) = request else {
                return Ok(json!({"copied": false, "count": 0}));
            };
            clipboard::write_text(writer, request.text.clone())
                .await
                .map_err(|e| e.to_string())?;

            let (copied, duration_ms) = {
                let mut a = ctx.app.lock().await;
                let copied = a.confirm_copy(&request);
                (copied, a.settings().notification.duration_ms)
            };
            ctx.schedule_expiry(copied.ticket, duration_ms);
            Ok(json!({"copied": true, "count": count, "message": copied.message}))
        }

        // ─── Notification ───
        "notification.get" => {
            let a = ctx.app.lock().await;
            serde_json::to_value(a.store.notification()).map_err(|e| e.to_string())
        }

        // ─── Storage ───
        "storage.usage" => {
            let a = ctx.app.lock().await;
            let usage = a.storage_usage().map_err(|e| e.to_string())?;
            serde_json::to_value(usage).map_err(|e| e.to_string())
        }

        // ─── Settings ───
        "settings.get" => {
            let a = ctx.app.lock().await;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = ctx.app.lock().await;
            a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
