//! SQLite database layer backing the persistent key-value medium.
//!
//! # Usage
//!
//! ```no_run
//! use copyme::database::Database;
//!
//! let db = Database::open("copyme.db").expect("failed to open database");
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
