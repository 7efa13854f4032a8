//! REST handlers and the domain-error-to-status mapping they share.

pub mod entry_apis;
pub mod mappers;
pub mod user_apis;

pub use entry_apis::*;
pub use user_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::domain::DomainError;
use shared::ErrorResponse;

/// Render a domain error as its status code plus a JSON message body.
pub(crate) fn error_response(error: DomainError) -> Response {
    let status = match &error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvalidCredentials | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            message: error.to_string(),
        }),
    )
        .into_response()
}
