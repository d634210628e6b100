//! copyme — a clipboard-history keeper with write-through persistence.
//!
//! The library holds the history store and its collaborators; the `copyme`
//! CLI and the `copyme-rpc` JSON-lines bridge are thin shells over [`app::App`].

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
