//! Integration tests for the request dispatcher
//!
//! Each test talks to an in-process axum backend over real HTTP.

mod common;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};
use shenghang::client::{ApiError, Dispatcher, RequestOptions, DETAIL_KEY};

use common::{spawn_backend, unused_base_url};

#[tokio::test]
async fn test_login_scenario_returns_payload() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let payload = dispatcher
        .dispatch(
            "/user/login/",
            RequestOptions::post().body(json!({"username": "a", "password": "b"})),
        )
        .await
        .expect("Login should succeed");

    assert_eq!(payload, json!({"user_id": 1, "username": "a"}));
}

#[tokio::test]
async fn test_json_body_is_sent_as_json_text() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();
    let body = json!({"song_title": "Moonlight", "filters": {"year": 2020}});

    let payload = dispatcher.post("/echo/", body.clone()).await.unwrap();

    assert_eq!(payload["content_type"], "application/json");
    let sent: Value = serde_json::from_str(payload["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, body);
}

#[tokio::test]
async fn test_text_body_and_header_override_pass_through() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let options = RequestOptions::default()
        .method(Method::POST)
        .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .body("raw=1".to_string());
    let payload = dispatcher.dispatch("/echo/", options).await.unwrap();

    assert_eq!(payload["content_type"], "text/plain");
    assert_eq!(payload["body"], "raw=1");
}

#[tokio::test]
async fn test_success_payload_is_returned_verbatim() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let payload = dispatcher
        .post("/song/search_song/", json!({"song_title": "夜空"}))
        .await
        .unwrap();

    assert_eq!(
        payload,
        json!({"results": [{"song_title": "夜空", "song_id": 5}]})
    );
}

#[tokio::test]
async fn test_html_error_page_is_non_json_response() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/html-error/").await.unwrap_err();

    match err {
        ApiError::NonJsonResponse {
            status,
            endpoint,
            content_type,
            raw_body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(endpoint, "/html-error/");
            assert!(content_type.unwrap().starts_with("text/html"));
            assert!(raw_body.starts_with("<html>"));
        }
        other => panic!("Expected NonJsonResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_success_is_non_json_response() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/plain/").await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::NonJsonResponse { status: 200, ref raw_body, .. } if raw_body == "OK"
    ));
}

#[tokio::test]
async fn test_missing_content_type_is_non_json_even_if_body_parses() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/no-content-type/").await.unwrap_err();

    match err {
        ApiError::NonJsonResponse {
            content_type,
            raw_body,
            ..
        } => {
            assert!(content_type.is_none());
            assert_eq!(raw_body, r#"{"a": 1}"#);
        }
        other => panic!("Expected NonJsonResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_body_is_malformed_json() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/bad-json/").await.unwrap_err();

    assert!(matches!(err, ApiError::MalformedJson { status: 200, .. }));
}

#[tokio::test]
async fn test_json_error_status_is_http_error_with_fields() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/missing/").await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    assert_eq!(err.endpoint(), Some("/missing/"));
    assert_eq!(err.field("code"), Some(&json!("missing")));
    assert_eq!(err.server_message(), Some("song not found"));
}

#[tokio::test]
async fn test_non_object_error_body_is_kept_as_detail() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher.get("/array-error/").await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.field(DETAIL_KEY), Some(&json!(["first", "second"])));
}

#[tokio::test]
async fn test_rejected_login_exposes_server_fields() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    let err = dispatcher
        .post("/user/login/", json!({"username": "a", "password": "wrong"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.field("field"), Some(&json!("password")));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let dispatcher = Dispatcher::new(unused_base_url().await).unwrap();

    let err = dispatcher.get("/user/profile/1/").await.unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.status(), None);
    assert_eq!(err.endpoint(), Some("/user/profile/1/"));
}

#[tokio::test]
async fn test_session_cookie_is_forwarded_after_login() {
    let backend = spawn_backend().await;
    let dispatcher = Dispatcher::new(backend.base_url).unwrap();

    dispatcher
        .post("/user/login/", json!({"username": "a", "password": "b"}))
        .await
        .unwrap();
    let payload = dispatcher.get("/user/whoami/").await.unwrap();

    assert_eq!(payload["cookie"], "sessionid=s3cr3t");
    assert_eq!(dispatcher.cookie_header().as_deref(), Some("sessionid=s3cr3t"));
}
