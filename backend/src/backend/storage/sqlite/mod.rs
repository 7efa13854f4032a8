//! # SQLite Storage Module
//!
//! Primary storage backend: a SQLite database accessed through SQLx with
//! the schema created on connect. The repositories implement the same
//! storage traits as the file backend, so the domain layer cannot tell the
//! two apart.

pub mod db;
pub mod repositories;

pub use db::DbConnection;
pub use repositories::{EntryRepository, UserRepository};
