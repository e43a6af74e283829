//! Tag routes.

use super::deleted;
use crate::error::ApiError;
use crate::{run_blocking, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use goaltrack_core::Tag;
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    run_blocking(move || Ok(state.tags().list_tags()?))
        .await
        .map(Json)
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Tag>, JsonRejection>,
) -> Result<Json<Tag>, ApiError> {
    let Json(tag) = payload?;
    run_blocking(move || Ok(state.tags().create_tag(tag)?))
        .await
        .map(Json)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Tag>, JsonRejection>,
) -> Result<Json<Tag>, ApiError> {
    let Json(tag) = payload?;
    run_blocking(move || Ok(state.tags().update_tag(&id, tag)?))
        .await
        .map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(move || Ok(state.tags().delete_tag(&id)?)).await?;
    Ok(deleted())
}
