//! Goal routes: CRUD, milestones and the progress view.

use super::deleted;
use crate::error::ApiError;
use crate::{run_blocking, AppState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use goaltrack_core::{CalendarMonth, Goal, GoalProgress, Milestone};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct MilestonesBody {
    milestones: Vec<Milestone>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// `YYYY-MM`; defaults to the current month.
    month: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, ApiError> {
    run_blocking(move || Ok(state.goals().list_goals()?))
        .await
        .map(Json)
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Goal>, JsonRejection>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let Json(goal) = payload?;
    let goal = run_blocking(move || Ok(state.goals().create_goal(goal)?)).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Goal>, ApiError> {
    run_blocking(move || Ok(state.goals().get_goal(&id)?))
        .await
        .map(Json)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Goal>, JsonRejection>,
) -> Result<Json<Goal>, ApiError> {
    let Json(goal) = payload?;
    run_blocking(move || Ok(state.goals().update_goal(&id, goal)?))
        .await
        .map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    run_blocking(move || Ok(state.goals().delete_goal(&id)?)).await?;
    Ok(deleted())
}

pub async fn set_milestones(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MilestonesBody>, JsonRejection>,
) -> Result<Json<Goal>, ApiError> {
    let Json(body) = payload?;
    run_blocking(move || Ok(state.goals().set_milestones(&id, body.milestones)?))
        .await
        .map(Json)
}

pub async fn progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> Result<Json<GoalProgress>, ApiError> {
    let Query(query) = query?;
    let month = query
        .month
        .as_deref()
        .map(str::parse::<CalendarMonth>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    run_blocking(move || Ok(state.goals().progress(&id, month)?))
        .await
        .map(Json)
}
