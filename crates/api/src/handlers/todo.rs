//! Handlers for the `/todos` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use todo_core::error::CoreError;
use todo_core::todo::{parse_completed_param, parse_window_param, DeadlineWindow};
use todo_core::types::DbId;
use todo_db::models::todo::{CreateTodo, Todo, TodoFilter, UpdateTodo};
use todo_db::repositories::TodoRepo;

use crate::error::{AppError, AppResult};
use crate::query::TodoListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Todo", id })
}

/// GET /api/v1/todos?completed=<bool>&window=<days>
///
/// An unparsable `completed` is a 400; an unparsable `window` is ignored.
/// Repeated keys use their first value.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<Todo>>> {
    let Query(pairs) = query?;
    let params = TodoListParams::from_pairs(pairs);
    let filter = TodoFilter {
        completed: parse_completed_param(params.completed.as_deref())?,
        window: parse_window_param(params.window.as_deref())
            .map(|days| DeadlineWindow::days_from(Utc::now(), days)),
    };
    let todos = TodoRepo::list(&state.pool, &filter).await?;
    Ok(Json(todos))
}

/// GET /api/v1/todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = path?;
    let todo = TodoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(todo))
}

/// POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let Json(input) = payload?;
    let todo = TodoRepo::create(&state.pool, &input).await?;
    tracing::info!(todo_id = todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/v1/todos/{id}
///
/// Partial update: only fields present in the body change. A present title
/// must not be blank.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let todo = TodoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(todo_id = id, "Todo updated");
    Ok(Json(todo))
}

/// DELETE /api/v1/todos/{id}
///
/// Responds with the removed todo. A missing id is a 400 with an empty
/// object body, unlike the 404 of get and update.
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Response> {
    let Path(id) = path?;
    match TodoRepo::delete(&state.pool, id).await? {
        Some(todo) => {
            tracing::info!(todo_id = id, "Todo deleted");
            Ok(Json(todo).into_response())
        }
        None => Ok((StatusCode::BAD_REQUEST, Json(json!({}))).into_response()),
    }
}
