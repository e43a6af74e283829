//! Entry routes, including the record-today shortcut.

use super::deleted;
use crate::error::ApiError;
use crate::{run_blocking, AppState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goaltrack_core::{Entry, EntryValue};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesQuery {
    goal_id: Option<String>,
}

/// Body of `POST /api/goals/:id/today`. Without a value, adherence goals
/// toggle today's flag.
#[derive(Debug, Default, Deserialize)]
pub struct TodayBody {
    #[serde(default)]
    value: Option<EntryValue>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let Query(query) = query?;
    run_blocking(move || Ok(state.entries().list_entries(query.goal_id.as_deref())?))
        .await
        .map(Json)
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Entry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(entry) = payload?;
    let entry = run_blocking(move || Ok(state.entries().create_entry(entry)?)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    run_blocking(move || Ok(state.entries().get_entry(&id)?))
        .await
        .map(Json)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Entry>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Json(entry) = payload?;
    run_blocking(move || Ok(state.entries().update_entry(&id, entry)?))
        .await
        .map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(move || Ok(state.entries().delete_entry(&id)?)).await?;
    Ok(deleted())
}

pub async fn record_today(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    payload: Result<Json<TodayBody>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Json(body) = payload?;
    run_blocking(move || {
        let service = state.entries();
        let entry = match body.value {
            Some(value) => service.record_today(&goal_id, value)?,
            None => service.toggle_adherence_today(&goal_id)?,
        };
        Ok(entry)
    })
    .await
    .map(Json)
}
