//! # REST API for Entries
//!
//! Endpoints for listing, creating and deleting ledger entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use super::error_response;
use crate::backend::storage::Connection;
use crate::backend::AppState;
use shared::{CreateEntryRequest, EntryListRequest, EntryTypeFilter};

// Query parameters for the entry listing API
#[derive(Debug, Deserialize)]
pub struct EntryListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub entry_type: Option<EntryTypeFilter>,
}

/// List entries with optional date-range and type filtering
pub async fn list_entries<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<EntryListQuery>,
) -> impl IntoResponse {
    info!("GET /api/entries - query: {:?}", query);

    let request = EntryListRequest {
        start_date: query.start_date,
        end_date: query.end_date,
        entry_type: query.entry_type,
    };

    match state.entry_service.list_entries(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list entries: {}", e);
            error_response(e)
        }
    }
}

/// Create a new entry
pub async fn create_entry<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/entries - request: {:?}", request);

    match state.entry_service.create_entry(request).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => {
            error!("Failed to create entry: {}", e);
            error_response(e)
        }
    }
}

/// Delete a single entry by id
pub async fn delete_entry<C: Connection>(
    State(state): State<AppState<C>>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/entries/{}", entry_id);

    match state.entry_service.delete_entry(&entry_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to delete entry {}: {}", entry_id, e);
            error_response(e)
        }
    }
}
