//! # File Storage Module
//!
//! This module provides a file-based storage implementation for the ledger.
//! It demonstrates that the domain logic is completely storage-agnostic by
//! providing an alternative to the SQL database implementation, and doubles
//! as the degraded mode the server falls back to when the database cannot
//! be opened.
//!
//! ## Layout
//!
//! - `entries.csv` — the whole ledger as one serialized list, rewritten
//!   atomically on every mutation:
//!   ```csv
//!   id,date,description,amount,entry_type
//!   cr-1705314600000-af3c,2024-01-15T10:30:00+00:00,"Salary",1200.00,credit
//!   db-1705401000000-b21e,2024-01-16T15:45:00+00:00,"Groceries",42.10,debit
//!   ```
//! - `users/<username>.yaml` — one YAML document per account.

pub mod connection;
pub mod entry_repository;
pub mod user_repository;

pub use connection::CsvConnection;
pub use entry_repository::EntryRepository;
pub use user_repository::UserRepository;
