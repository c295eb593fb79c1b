use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::commands::complete::COMPLETED_REQUIRED;
use crate::commands::create::TEXT_REQUIRED;
use crate::model::Todo;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const ID_REQUIRED: &str = "Todo id is required";

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoBody {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoBody {
    #[serde(default)]
    pub completed: Option<bool>,
}

/// An empty body reads as `{}`; anything else must be valid JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state
        .run(|api| api.get_all())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch todos"))?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let body: CreateTodoBody = parse_body(&body)?;
    let text = match body.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ApiError::BadRequest(TEXT_REQUIRED.to_string())),
    };

    let todo = state
        .run(move |api| api.create(Some(&text)))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to create todo"))?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Todo>> {
    let body: UpdateTodoBody = parse_body(&body)?;
    let Some(completed) = body.completed else {
        return Err(ApiError::BadRequest(COMPLETED_REQUIRED.to_string()));
    };

    let todo = state
        .run(move |api| api.set_completed(&id, Some(completed)))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to update todo"))?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .run(move |api| api.remove(&id))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete todo"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_completed(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state
        .run(|api| api.clear_completed())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to clear completed todos"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT`/`DELETE /api/todos/` with the id segment left out.
pub async fn missing_id() -> ApiError {
    ApiError::BadRequest(ID_REQUIRED.to_string())
}
