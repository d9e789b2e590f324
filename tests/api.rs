use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use exam_guard::{
    api::responses::{ApiResponse, HealthResponse, StatusResponse},
    create_router,
    state::SubmitReason,
    AppState, GuardPhase,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> Router {
    create_router(Arc::new(AppState::new(20554, "127.0.0.1".to_string(), 60)))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (status, body) = call(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json::<HealthResponse>(&body).status, "ok");
}

#[tokio::test(start_paused = true)]
async fn session_lifecycle_with_manual_submit() {
    let app = app();

    let (status, body) = call(&app, Method::POST, "/sessions", Some(r#"{"duration_seconds":"601"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let started: ApiResponse = json(&body);
    assert_eq!(started.status, "active");
    assert_eq!(started.session.view.text.as_deref(), Some("10:01"));
    let id = started.session.id;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let (_, body) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    let current: ApiResponse = json(&body);
    let guard = current.session.guard.unwrap();
    assert_eq!(guard.display, "10:00");
    assert_eq!(current.session.view.urgency_class.as_deref(), Some("is-warning"));

    let (status, body) = call(&app, Method::POST, &format!("/sessions/{}/submit", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let submitted: ApiResponse = json(&body);
    assert_eq!(submitted.session.submissions.len(), 1);
    assert_eq!(submitted.session.submissions[0].reason, SubmitReason::Manual);

    let (status, _) = call(&app, Method::POST, &format!("/sessions/{}/submit", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_secs(700)).await;
    let (_, body) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    let after: ApiResponse = json(&body);
    assert_eq!(after.session.submissions.len(), 1);
    assert_eq!(after.session.guard.unwrap().phase, GuardPhase::Submitted);
}

#[tokio::test(start_paused = true)]
async fn expired_session_is_auto_submitted() {
    let app = app();
    let (_, body) = call(&app, Method::POST, "/sessions", Some(r#"{"duration_seconds":2}"#)).await;
    let id = json::<ApiResponse>(&body).session.id;

    tokio::time::sleep(Duration::from_secs(3)).await;
    let (_, body) = call(&app, Method::GET, &format!("/sessions/{}", id), None).await;
    let expired: ApiResponse = json(&body);
    assert_eq!(expired.status, "inactive");
    assert_eq!(expired.session.submissions.len(), 1);
    assert_eq!(expired.session.submissions[0].reason, SubmitReason::Expired);
    assert_eq!(expired.session.view.text.as_deref(), Some("00:00"));
}

#[tokio::test(start_paused = true)]
async fn invalid_duration_opens_inactive_session() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/sessions", Some(r#"{"duration_seconds":"soon"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let response: ApiResponse = json(&body);
    assert_eq!(response.status, "inactive");
    assert!(response.session.guard.is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_body_uses_default_duration() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    let response: ApiResponse = json(&body);
    assert_eq!(response.session.guard.unwrap().seconds_remaining, 3600);
}

#[tokio::test(start_paused = true)]
async fn malformed_body_is_rejected() {
    let app = app();
    for body in [r#"{"duration_seconds":"#, "601", "true"] {
        let (status, _) = call(&app, Method::POST, "/sessions", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
    }

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(json::<StatusResponse>(&body).total_sessions, 0);
}

#[tokio::test(start_paused = true)]
async fn unknown_and_deleted_sessions() {
    let app = app();
    let (status, _) = call(&app, Method::GET, "/sessions/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::POST, "/sessions/99/submit", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, Method::POST, "/sessions", Some(r#"{"duration_seconds":30}"#)).await;
    let id = json::<ApiResponse>(&body).session.id;

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    let server: StatusResponse = json(&body);
    assert_eq!((server.active_sessions, server.total_sessions), (1, 1));

    let (status, _) = call(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    let server: StatusResponse = json(&body);
    assert_eq!(server.total_sessions, 0);
    assert_eq!(server.last_action.as_deref(), Some("end"));
}
