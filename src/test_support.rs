//! In-process mock of the todo server for client tests.
//!
//! Serves under `/api` on an ephemeral `127.0.0.1` port. Accepts a single
//! account (`alice` / `secret`) whose token is [`ALICE_TOKEN`].

use std::sync::{Arc, Mutex};

use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::state::auth::AuthStore;

pub(crate) const ALICE_TOKEN: &str = "tok-alice";
const CREATED_AT: &str = "2024-03-01T09:30:00Z";

#[derive(Clone, Default)]
struct MockState {
    todos: Arc<Mutex<Vec<Value>>>,
}

/// Bind the mock server and return its base URL (ending in `/api`).
pub(crate) async fn spawn_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().nest("/api", routes()).with_state(MockState::default());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

/// Mock server plus a client pointed at it, sharing a fresh session.
pub(crate) async fn mock_client() -> (ApiClient, AuthStore, String) {
    let base_url = spawn_mock_server().await;
    let auth = AuthStore::new();
    let config = ClientConfig::new(&base_url).unwrap();
    let client = ApiClient::new(&config, auth.clone()).unwrap();
    (client, auth, base_url)
}

fn routes() -> Router<MockState> {
    Router::new()
        .route("/echo", any(echo))
        .route("/json", get(|| async { Json(json!({ "a": 1 })) }))
        .route("/empty", get(|| async { StatusCode::OK }))
        .route("/garbage", get(|| async { (StatusCode::OK, "not json") }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "not found") }))
        .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/auth/login", post(login))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
}

/// Reflects method, path, selected headers, and body back as JSON.
async fn echo(method: Method, OriginalUri(uri): OriginalUri, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "authorization": header("authorization"),
        "content_type": header("content-type"),
        "x_trace": header("x-trace"),
        "body": body,
    }))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "alice" && body["password"] == "secret" {
        Json(json!({ "token": ALICE_TOKEN, "username": "alice" })).into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ALICE_TOKEN}"))
}

async fn list_todos(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let todos = state.todos.lock().unwrap().clone();
    Json(Value::Array(todos)).into_response()
}

async fn create_todo(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(title) = body["title"].as_str().map(str::trim).filter(|t| !t.is_empty()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut todos = state.todos.lock().unwrap();
    let todo = json!({
        "id": todos.len() + 1,
        "title": title,
        "completed": false,
        "createdAt": CREATED_AT,
    });
    todos.push(todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn get_todo(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let todos = state.todos.lock().unwrap();
    match todos.iter().find(|t| t["id"] == id) {
        Some(todo) => Json(todo.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_todo(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut todos = state.todos.lock().unwrap();
    let Some(todo) = todos.iter_mut().find(|t| t["id"] == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(title) = body["title"].as_str().map(str::trim).filter(|t| !t.is_empty()) {
        todo["title"] = json!(title);
    }
    if let Some(completed) = body["completed"].as_bool() {
        todo["completed"] = json!(completed);
    }
    Json(todo.clone()).into_response()
}

async fn delete_todo(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut todos = state.todos.lock().unwrap();
    let before = todos.len();
    todos.retain(|t| t["id"] != id);
    if todos.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
