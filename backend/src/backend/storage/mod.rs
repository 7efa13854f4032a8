//! # Storage Module
//!
//! Handles all data persistence operations for the ledger.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving data. The
//! implementation can be swapped without affecting the domain logic or the
//! REST layer: the server runs against SQLite by default and falls back to
//! the file store when the database cannot be opened.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not
//!   implementations
//! - **Atomic Writes**: Both backends acknowledge a mutation only after it
//!   is durably applied

pub mod csv;
pub mod sqlite;
pub mod traits;

// Re-export the main types that other modules need
pub use csv::CsvConnection;
pub use sqlite::DbConnection;
pub use traits::{Connection, EntryStorage, UserStorage};
