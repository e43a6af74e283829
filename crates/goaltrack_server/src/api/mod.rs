//! Route table.

mod entries;
mod goals;
mod tags;
mod todos;

use crate::AppState;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/goals", get(goals::list).post(goals::create))
        .route(
            "/api/goals/:id",
            get(goals::get_one).put(goals::replace).delete(goals::remove),
        )
        .route("/api/goals/:id/milestones", put(goals::set_milestones))
        .route("/api/goals/:id/progress", get(goals::progress))
        .route("/api/goals/:id/today", post(entries::record_today))
        .route("/api/entries", get(entries::list).post(entries::create))
        .route(
            "/api/entries/:id",
            get(entries::get_one)
                .put(entries::replace)
                .delete(entries::remove),
        )
        .route("/api/todos", get(todos::list).post(todos::create))
        .route("/api/todos/today", post(todos::add_today))
        .route("/api/todos/reorder", put(todos::reorder))
        .route("/api/todos/:id", put(todos::replace).delete(todos::remove))
        .route("/api/todos/:id/toggle", post(todos::toggle))
        .route(
            "/api/todos/:id/subtasks/:sub_task_id/toggle",
            post(todos::toggle_sub_task),
        )
        .route("/api/tags", get(tags::list).post(tags::create))
        .route("/api/tags/:id", put(tags::replace).delete(tags::remove))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": goaltrack_core::core_version() }))
}

fn deleted() -> Json<Value> {
    Json(json!({ "success": true }))
}
