//! # Backend Module
//!
//! Contains everything behind the HTTP surface of the daily ledger.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: validation, filtering/aggregation and account rules
//! - **Storage**: data persistence mechanisms (database, file store)
//! - **IO**: the REST interface layer
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Single-page client
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, ledger semantics)
//!     ↓
//! Storage Layer (SQLite or file store)
//! ```
//!
//! The storage backend is chosen at startup and everything above it is
//! generic over the [`storage::Connection`] it was given.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::backend::config::AppConfig;
use crate::backend::domain::{EntryService, SessionService, UserService};
use crate::backend::storage::Connection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub entry_service: EntryService<C>,
    pub user_service: UserService<C>,
    pub session_service: SessionService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend<C: Connection>(
    connection: Arc<C>,
    admin_password: &str,
) -> Result<AppState<C>> {
    info!("Setting up domain services");
    let entry_service = EntryService::new(connection.clone());
    let user_service = UserService::new(connection);
    user_service.ensure_bootstrap_admin(admin_password).await?;

    let session_service = SessionService::new();

    Ok(AppState {
        entry_service,
        user_service,
        session_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router<C: Connection>(app_state: AppState<C>, config: &AppConfig) -> Result<Router> {
    // CORS setup to allow the page to make requests from its dev origin
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/entries",
            get(io::list_entries::<C>).post(io::create_entry::<C>),
        )
        .route("/entries/:id", delete(io::delete_entry::<C>))
        .route("/auth/login", post(io::login::<C>))
        .route("/auth/logout", post(io::logout::<C>))
        .route("/auth/me", get(io::current_user::<C>))
        .route(
            "/users",
            get(io::list_users::<C>).post(io::create_user::<C>),
        );

    // Define our main application router; anything outside /api serves the
    // static page assets
    Ok(Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::DbConnection;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use shared::{CreateEntryRequest, EntryListResponse, EntryType};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        let app_state = initialize_backend(db, "test-admin").await.unwrap();
        create_router(app_state, &test_config()).unwrap()
    }

    fn test_config() -> AppConfig {
        AppConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            storage: crate::backend::config::StorageChoice::Sqlite,
            database_url: "sqlite::memory:".to_string(),
            data_dir: None,
            static_dir: "static".into(),
            cors_origin: "http://localhost:8080".to_string(),
            admin_password: "test-admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_entries_route_empty_store() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: EntryListResponse = serde_json::from_slice(&body).unwrap();
        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.summary.total_credit, 0.0);
        assert_eq!(parsed.summary.total_debit, 0.0);
    }

    #[tokio::test]
    async fn test_create_entry_route() {
        let app = test_router().await;

        let request = CreateEntryRequest {
            description: "Salary".to_string(),
            amount: 1200.0,
            entry_type: EntryType::Credit,
            date: None,
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entries")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unknown_type_filter_is_rejected_at_the_route() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries?entry_type=transfer")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_users_route_requires_auth() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
