//! mailsink library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, ingestion run
//! - `source`: content sources (file, URL, stdin)
//! - `decode`: header, subject, and date decoding
//! - `address`: free-form address-list parsing
//! - `walk`: MIME tree traversal into parts and attachments
//! - `assemble`: normalized record assembly
//! - `store`: relational writes and retrieval helpers
//! - `sanitize`: output sanitation for the API boundary
//! - `db`: migrations and SQLite helpers
//! - `models`: typed records used across layers
//! - `util`: tracing setup

pub mod address;
pub mod app;
pub mod assemble;
pub mod db;
pub mod decode;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod source;
pub mod store;
pub mod util;
pub mod walk;

pub use error::{Result, SinkError};
