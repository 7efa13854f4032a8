//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::entry::Entry;
use crate::backend::domain::models::user::User;

/// Trait defining the interface for entry storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (SQL databases, CSV files, etc.) without modification.
#[async_trait]
pub trait EntryStorage: Send + Sync {
    /// Store a new entry
    async fn store_entry(&self, entry: &Entry) -> Result<()>;

    /// Retrieve a specific entry by ID
    async fn get_entry(&self, entry_id: &str) -> Result<Option<Entry>>;

    /// List all entries ordered by date descending (most recent first)
    async fn list_entries(&self) -> Result<Vec<Entry>>;

    /// Delete a single entry
    /// Returns true if the entry was found and deleted, false otherwise
    async fn delete_entry(&self, entry_id: &str) -> Result<bool>;
}

/// Trait defining the interface for user account storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Retrieve a specific user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Look a user up by their unique username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// List all users ordered by username
    async fn list_users(&self) -> Result<Vec<User>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (database, CSV
/// files, etc.) and provides factory methods for creating repositories. This
/// allows the domain layer to work with any storage backend without knowing
/// the implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    /// The type of EntryStorage this connection creates
    type EntryRepository: EntryStorage + Clone + 'static;

    /// The type of UserStorage this connection creates
    type UserRepository: UserStorage + Clone + 'static;

    /// Create a new entry repository for this connection
    fn create_entry_repository(&self) -> Self::EntryRepository;

    /// Create a new user repository for this connection
    fn create_user_repository(&self) -> Self::UserRepository;
}
