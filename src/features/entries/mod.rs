pub mod error;
pub mod model;

use crate::AppState;
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, put},
};
use error::ApiError;
use crate::domain::EntryFields;
use model::{EntryPayload, JsonEntry};
use serde_json::Value;
use tracing::Span;

pub fn entries_router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries_handler).post(create_entry_handler))
        .route(
            "/entries/{entry_id}",
            put(update_entry_handler).delete(delete_entry_handler),
        )
}

#[tracing::instrument(skip_all)]
async fn list_entries_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonEntry>>, ApiError> {
    let entries = state.entries.list_all().await.map_err(ApiError::store)?;

    tracing::debug!(count = entries.len(), "listed entries");

    Ok(Json(entries.into_iter().map(JsonEntry::from).collect()))
}

#[tracing::instrument(skip_all, fields(entry_id = tracing::field::Empty))]
async fn create_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<JsonEntry>), ApiError> {
    // validate before touching the store
    let fields = entry_fields(payload)?;

    let entry = state.entries.create(&fields).await.map_err(ApiError::store)?;

    Span::current().record("entry_id", entry.entry_id);
    tracing::info!("created entry {}", entry);

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[tracing::instrument(skip_all, fields(entry_id = tracing::field::Empty))]
async fn update_entry_handler(
    State(state): State<AppState>,
    entry_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<JsonEntry>, ApiError> {
    let Path(entry_id) = entry_id?;
    Span::current().record("entry_id", entry_id);

    let fields = entry_fields(payload)?;

    let updated = state
        .entries
        .update_by_id(entry_id, &fields)
        .await
        .map_err(ApiError::store)?;

    match updated {
        Some(entry) => {
            tracing::info!("updated entry {}", entry);
            Ok(Json(entry.into()))
        }
        None => Err(ApiError::NotFound(entry_id)),
    }
}

#[tracing::instrument(skip_all, fields(entry_id = tracing::field::Empty))]
async fn delete_entry_handler(
    State(state): State<AppState>,
    entry_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(entry_id) = entry_id?;
    Span::current().record("entry_id", entry_id);

    let deleted = state
        .entries
        .delete_by_id(entry_id)
        .await
        .map_err(ApiError::store)?;

    if deleted {
        tracing::info!("deleted entry");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(entry_id))
    }
}

fn entry_fields(payload: Result<Json<Value>, JsonRejection>) -> Result<EntryFields, ApiError> {
    let Json(body) = payload?;
    EntryPayload::from_json(body)?
        .validate()
        .map_err(ApiError::MissingFields)
}
