//! Todo routes: dated lists, manual ordering and completion toggles.

use super::deleted;
use crate::error::ApiError;
use crate::{run_blocking, AppState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use goaltrack_core::progress::dates::parse_day;
use goaltrack_core::Todo;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TodosQuery {
    /// `yyyy-MM-dd`; lists only that day when present.
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickAddBody {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBody {
    ordered_ids: Vec<String>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<TodosQuery>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(query) = query?;
    let date = query
        .date
        .as_deref()
        .map(|raw| {
            parse_day(raw).ok_or_else(|| {
                ApiError::BadRequest(format!("invalid date `{raw}`; expected yyyy-MM-dd"))
            })
        })
        .transpose()?;
    run_blocking(move || {
        let service = state.todos();
        let todos = match date {
            Some(date) => service.list_for_date(date)?,
            None => service.list_todos()?,
        };
        Ok(todos)
    })
    .await
    .map(Json)
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(todo) = payload?;
    run_blocking(move || Ok(state.todos().create_todo(todo)?))
        .await
        .map(Json)
}

/// Adds a todo dated today from just its text.
pub async fn add_today(
    State(state): State<AppState>,
    payload: Result<Json<QuickAddBody>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(body) = payload?;
    run_blocking(move || Ok(state.todos().add_today(body.text)?))
        .await
        .map(Json)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(todo) = payload?;
    run_blocking(move || Ok(state.todos().update_todo(&id, todo)?))
        .await
        .map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(move || Ok(state.todos().delete_todo(&id)?)).await?;
    Ok(deleted())
}

pub async fn reorder(
    State(state): State<AppState>,
    payload: Result<Json<ReorderBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    run_blocking(move || Ok(state.todos().reorder(&body.ordered_ids)?)).await?;
    Ok(deleted())
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    run_blocking(move || Ok(state.todos().toggle_completed(&id)?))
        .await
        .map(Json)
}

pub async fn toggle_sub_task(
    State(state): State<AppState>,
    Path((id, sub_task_id)): Path<(String, String)>,
) -> Result<Json<Todo>, ApiError> {
    run_blocking(move || Ok(state.todos().toggle_subtask(&id, &sub_task_id)?))
        .await
        .map(Json)
}
