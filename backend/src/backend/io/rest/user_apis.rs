//! # REST API for Accounts and Sessions
//!
//! Login/logout, session introspection and admin-only account creation.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use super::error_response;
use crate::backend::domain::models::user::UserRole;
use crate::backend::domain::{DomainError, Session};
use crate::backend::io::rest::mappers::user_mapper::UserMapper;
use crate::backend::storage::Connection;
use crate::backend::AppState;
use shared::{CreateUserRequest, LoginRequest, LoginResponse, UserListResponse};

/// Pull the bearer token out of the Authorization header, if any
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the caller's session or fail with `Unauthorized`
fn resolve_session<C: Connection>(
    state: &AppState<C>,
    headers: &HeaderMap,
) -> Result<Session, DomainError> {
    let token = bearer_token(headers).ok_or(DomainError::Unauthorized)?;
    state
        .session_service
        .resolve(token)
        .ok_or(DomainError::Unauthorized)
}

/// Resolve the caller's session and require the admin role
fn require_admin<C: Connection>(
    state: &AppState<C>,
    headers: &HeaderMap,
) -> Result<Session, DomainError> {
    let session = resolve_session(state, headers)?;
    if session.role != UserRole::Admin {
        return Err(DomainError::Forbidden);
    }
    Ok(session)
}

/// Verify credentials and open a session
pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - username: {}", request.username);

    match state
        .user_service
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(user) => {
            let token = state.session_service.sign_in(&user);
            let response = LoginResponse {
                token,
                user: UserMapper::to_dto(user),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Login failed for '{}': {}", request.username, e);
            error_response(e)
        }
    }
}

/// Close the caller's session
pub async fn logout<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    match bearer_token(&headers) {
        Some(token) => {
            state.session_service.sign_out(token);
            StatusCode::NO_CONTENT.into_response()
        }
        None => error_response(DomainError::Unauthorized),
    }
}

/// Return the account behind the caller's session
pub async fn current_user<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let session = match resolve_session(&state, &headers) {
        Ok(session) => session,
        Err(e) => return error_response(e),
    };

    match state.user_service.get_user(&session.user_id).await {
        // The account may have vanished underneath a live session
        Ok(Some(user)) => (StatusCode::OK, Json(UserMapper::to_dto(user))).into_response(),
        Ok(None) => error_response(DomainError::Unauthorized),
        Err(e) => {
            error!("Failed to load user {}: {}", session.user_id, e);
            error_response(e)
        }
    }
}

/// Create a new account (admin only)
pub async fn create_user<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - username: {}", request.username);

    if let Err(e) = require_admin(&state, &headers) {
        return error_response(e);
    }

    match state.user_service.create_user(request).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => {
            error!("Failed to create user: {}", e);
            error_response(e)
        }
    }
}

/// List all accounts (admin only)
pub async fn list_users<C: Connection>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("GET /api/users");

    if let Err(e) = require_admin(&state, &headers) {
        return error_response(e);
    }

    match state.user_service.list_users().await {
        Ok(users) => (StatusCode::OK, Json(UserListResponse { users })).into_response(),
        Err(e) => {
            error!("Failed to list users: {}", e);
            error_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::initialize_backend;
    use crate::backend::storage::DbConnection;
    use axum::body::to_bytes;
    use shared::UserRole as SharedUserRole;
    use std::sync::Arc;

    async fn setup_test_state() -> AppState<DbConnection> {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        initialize_backend(db, "test-admin").await.unwrap()
    }

    fn auth_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        headers
    }

    async fn login_as(state: &AppState<DbConnection>, username: &str, password: &str) -> String {
        let response = login(
            State(state.clone()),
            Json(LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: LoginResponse = serde_json::from_slice(&body).unwrap();
        parsed.token
    }

    #[tokio::test]
    async fn test_login_with_bootstrap_admin() {
        let state = setup_test_state().await;
        let token = login_as(&state, "admin", "test-admin").await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials() {
        let state = setup_test_state().await;

        let response = login(
            State(state),
            Json(LoginRequest {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_user_requires_a_session() {
        let state = setup_test_state().await;

        let request = CreateUserRequest {
            username: "johndoe".to_string(),
            password: "hunter2".to_string(),
            display_name: "John Doe".to_string(),
            role: SharedUserRole::User,
        };

        let response = create_user(State(state), HeaderMap::new(), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_creates_user_then_duplicate_conflicts() {
        let state = setup_test_state().await;
        let token = login_as(&state, "admin", "test-admin").await;

        let request = CreateUserRequest {
            username: "johndoe".to_string(),
            password: "hunter2".to_string(),
            display_name: "John Doe".to_string(),
            role: SharedUserRole::User,
        };

        let response = create_user(
            State(state.clone()),
            auth_headers(&token),
            Json(request.clone()),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);

        let response = create_user(State(state), auth_headers(&token), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create_users() {
        let state = setup_test_state().await;
        let admin_token = login_as(&state, "admin", "test-admin").await;

        let response = create_user(
            State(state.clone()),
            auth_headers(&admin_token),
            Json(CreateUserRequest {
                username: "johndoe".to_string(),
                password: "hunter2".to_string(),
                display_name: "John Doe".to_string(),
                role: SharedUserRole::User,
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::CREATED);

        let user_token = login_as(&state, "johndoe", "hunter2").await;
        let response = create_user(
            State(state),
            auth_headers(&user_token),
            Json(CreateUserRequest {
                username: "janedoe".to_string(),
                password: "hunter2".to_string(),
                display_name: "Jane Doe".to_string(),
                role: SharedUserRole::Admin,
            }),
        )
        .await;
        assert_eq!(response.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_logout_invalidates_the_session() {
        let state = setup_test_state().await;
        let token = login_as(&state, "admin", "test-admin").await;

        let response = current_user(State(state.clone()), auth_headers(&token))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = logout(State(state.clone()), auth_headers(&token))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = current_user(State(state), auth_headers(&token))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
