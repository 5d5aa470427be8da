//! # shim-resolver - Static record resolver for NSS shim testing
//!
//! A stateless, single-shot lookup over small fixed tables of POSIX-style
//! identity records (`/etc/group`, `/etc/passwd`, `/etc/shadow` line formats).
//! It stands in for a real name-service backend: the shim under test invokes
//! the binary with a database selector and a query mode, passes the lookup
//! key through an environment variable, and parses whatever lands on stdout.
//!
//! shim-resolver provides:
//! - Built-in fixture tables plus optional TOML-sourced overrides
//! - Exact-match name lookup and string-compared id lookup
//! - Colon-delimited line output, or the JSON object form the shim also accepts
//! - "No match" for every unsupported query shape - the caller treats empty
//!   output as not-found regardless of cause

pub mod config;
pub mod output;
pub mod record;
pub mod resolver;
pub mod table;

// Re-exports for convenient access
pub use record::{Database, Record};
pub use resolver::{resolve, Mode};
pub use table::Table;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for resolver operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid {database} record ({reason}): {line}")]
    InvalidRecord {
        database: Database,
        reason: String,
        line: String,
    },

    #[error("duplicate {database} entry: {name}")]
    DuplicateEntry { database: Database, name: String },

    #[error("unknown database: {0}")]
    UnknownDatabase(String),

    #[error("unknown query mode: {0}")]
    UnknownMode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
