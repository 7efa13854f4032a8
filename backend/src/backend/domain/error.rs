//! Error type shared by the domain services.
//!
//! The REST layer maps each variant onto a status code; everything the
//! storage backends report arrives here through the `Storage` variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The request itself is malformed (bad field, bad date format, ...)
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with existing state (duplicate username)
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No usable session token on a protected endpoint
    #[error("Authentication required")]
    Unauthorized,

    /// Valid session, insufficient role
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Backend/transport failure surfaced from a storage adapter
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
