//! In-process backend used by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// A running test backend
pub struct Backend {
    pub base_url: String,
    /// Requests served by `/song/profile/{id}/`
    pub profile_hits: Arc<AtomicUsize>,
}

impl Backend {
    pub fn profile_hits(&self) -> usize {
        self.profile_hits.load(Ordering::SeqCst)
    }
}

/// Starts the backend on an ephemeral port
pub async fn spawn_backend() -> Backend {
    spawn_router(true).await
}

/// Starts the backend with a `/user/logout/` route that always fails
pub async fn spawn_backend_without_logout() -> Backend {
    spawn_router(false).await
}

async fn spawn_router(with_logout: bool) -> Backend {
    let profile_hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/user/login/", post(login))
        .route("/user/whoami/", get(whoami))
        .route("/user/profile/{id}/", get(user_profile))
        .route("/song/profile/{id}/", get(song_profile))
        .route("/song/search_song/", post(search_song))
        .route("/comment/get_comment_stats/", get(comment_stats))
        .route("/echo/", post(echo))
        .route("/html-error/", get(html_error))
        .route("/plain/", get(plain_text))
        .route("/no-content-type/", get(no_content_type))
        .route("/bad-json/", get(bad_json))
        .route("/missing/", get(json_error))
        .route("/array-error/", get(array_error))
        .route("/empty-list/", get(empty_list))
        .fallback(record);
    let app = if with_logout {
        app.route("/user/logout/", post(logout))
    } else {
        app.route("/user/logout/", post(html_error))
    };
    let app = app.with_state(Arc::clone(&profile_hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test backend");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test backend crashed");
    });

    Backend {
        base_url: format!("http://{}", addr),
        profile_hits,
    }
}

/// An address nothing is listening on
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (username, password) {
        ("a", "b") => (
            [(SET_COOKIE, "sessionid=s3cr3t; Path=/")],
            Json(json!({"user_id": 1, "username": "a"})),
        )
            .into_response(),
        ("root", "admin") => (
            [(SET_COOKIE, "sessionid=r00t; Path=/")],
            Json(json!({"message": "ok", "user_id": 99, "username": "root", "is_admin": true})),
        )
            .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "wrong username or password", "field": "password"})),
        )
            .into_response(),
    }
}

async fn logout() -> Json<Value> {
    Json(json!({"message": "logged out"}))
}

async fn whoami(headers: HeaderMap) -> Json<Value> {
    let cookie = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(json!({"cookie": cookie}))
}

async fn user_profile(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({"user_id": id, "username": format!("user{}", id)}))
}

async fn song_profile(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<u64>) -> Json<Value> {
    let n = hits.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({"song_id": id, "title": "Moonlight", "served": n}))
}

async fn search_song(Json(filters): Json<Value>) -> Json<Value> {
    Json(json!({"results": [{"song_title": filters["song_title"], "song_id": 5}]}))
}

async fn comment_stats(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "target_type": params.get("target_type"),
        "target_id": params.get("target_id"),
        "comment_count": 2,
    }))
}

/// Any unrouted request: describes what was received
async fn record(method: Method, uri: Uri, body: String) -> Json<Value> {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "body": body,
    }))
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(json!({"content_type": content_type, "body": body}))
}

async fn html_error() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<html><body>Server Error (500)</body></html>"),
    )
}

async fn plain_text() -> &'static str {
    "OK"
}

async fn no_content_type() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .body(Body::from(r#"{"a": 1}"#))
        .expect("Valid response")
}

async fn bad_json() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], "{not json")
}

async fn json_error() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "song not found", "code": "missing"})),
    )
}

async fn array_error() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, Json(json!(["first", "second"])))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}
