//! copyme RPC Server — JSON lines over stdin/stdout for a UI shell.
//!
//! Request:  {"id":1, "method":"history.add", "params":{"text":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"ready"}, {"event":"notification.expired"}, {"event":"shutdown"}
//!
//! Requests run concurrently and finished ones are reaped as new ones arrive;
//! a single writer task owns stdout.

use std::env;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use copyme::app::App;
use copyme::logging;
use copyme::rpc_handler::{InFlight, RpcContext};

const CONFIG_ENV: &str = "COPYME_CONFIG";

#[tokio::main]
async fn main() {
    logging::init();

    let app = match App::open(env::var(CONFIG_ENV).ok()) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to initialize copyme");
            std::process::exit(1);
        }
    };
    if app.store.rehydration().is_degraded() {
        warn!(rehydration = ?app.store.rehydration(), "Started with an empty history");
    }

    let (ctx, events) = RpcContext::new(app);
    let writer = tokio::spawn(write_lines(events));

    ctx.emit(json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let mut in_flight = InFlight::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                ctx.emit(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        in_flight.dispatch(&ctx, req);
    }

    in_flight.drain().await;
    info!("stdin closed, shutting down");
    ctx.emit(json!({"event": "shutdown"}));
    let _ = writer.await;
}

/// Writes every message as one line until the shutdown event has been written.
async fn write_lines(mut events: mpsc::UnboundedReceiver<Value>) {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = events.recv().await {
        let line = format!("{}\n", message);
        if stdout.write_all(line.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            break;
        }
        if message.get("event").and_then(|v| v.as_str()) == Some("shutdown") {
            break;
        }
    }
}
