//! Todo endpoints, scoped server-side to the logged-in user.

use crate::error::ApiError;
use crate::net::api::{ApiClient, RequestOptions};
use crate::net::types::{CreateTodo, Todo, UpdateTodo};

const TODOS_PATH: &str = "/todos";

fn todo_path(id: i64) -> String {
    format!("{TODOS_PATH}/{id}")
}

/// Newest first, as ordered by the server.
///
/// # Errors
///
/// Propagates any [`ApiError`] from the request.
pub async fn list(client: &ApiClient) -> Result<Vec<Todo>, ApiError> {
    Ok(client.request_json::<Vec<Todo>>(TODOS_PATH, RequestOptions::get()).await?.unwrap_or_default())
}

/// # Errors
///
/// [`ApiError::Request`] with status `400` for a blank title.
pub async fn create(client: &ApiClient, title: &str) -> Result<Todo, ApiError> {
    let options = RequestOptions::post().json(&CreateTodo { title: title.to_string() })?;
    client.request_json(TODOS_PATH, options).await?.ok_or(ApiError::EmptyBody)
}

/// # Errors
///
/// [`ApiError::Request`] with status `404` when the todo is missing or
/// belongs to someone else.
pub async fn get(client: &ApiClient, id: i64) -> Result<Todo, ApiError> {
    client.request_json(&todo_path(id), RequestOptions::get()).await?.ok_or(ApiError::EmptyBody)
}

/// Apply the fields set in `update`; the rest stay as they are.
///
/// # Errors
///
/// [`ApiError::Request`] with status `404` when the todo is missing.
pub async fn update(client: &ApiClient, id: i64, update: &UpdateTodo) -> Result<Todo, ApiError> {
    let options = RequestOptions::put().json(update)?;
    client.request_json(&todo_path(id), options).await?.ok_or(ApiError::EmptyBody)
}

/// # Errors
///
/// [`ApiError::Request`] with status `404` when the todo is missing.
pub async fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.request_json::<serde_json::Value>(&todo_path(id), RequestOptions::delete()).await?;
    Ok(())
}

#[cfg(test)]
#[path = "todos_test.rs"]
mod tests;
