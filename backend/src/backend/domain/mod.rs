//! # Domain Module
//!
//! Business logic for the ledger, independent of both the REST surface and
//! the storage backend in use.
//!
//! - `ledger` holds the filtering/aggregation semantics
//! - the services orchestrate validation, id/timestamp assignment and
//!   persistence through the storage traits
//! - `models` are the types the storage layer persists

pub mod entry_service;
pub mod error;
pub mod ledger;
pub mod models;
pub mod session_service;
pub mod user_service;

pub use entry_service::EntryService;
pub use error::{DomainError, DomainResult};
pub use session_service::{Session, SessionService};
pub use user_service::UserService;
