mod common;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_event_then_list_returns_it_once() {
    let app = TestApp::new().await;

    let created = app.create_event("Standup", "09:00", "09:15").await;
    let id = created["id"].as_i64().expect("server assigned id");
    assert_eq!(created["name"], "Standup");
    assert_eq!(created["start_time"], "09:00");
    assert_eq!(created["end_time"], "09:15");
    assert!(created["created_at"].is_string());

    let (status, events) = app.json("GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.iter().filter(|e| e["id"] == id).count(), 1);
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_events_listed_by_start_time_descending() {
    let app = TestApp::new().await;

    app.create_event("Morning", "08:00", "09:00").await;
    app.create_event("Evening", "18:00", "19:00").await;
    app.create_event("Noon", "12:00", "13:00").await;

    let (_, events) = app.json("GET", "/api/events", None).await;
    let names: Vec<&str> = events.as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Evening", "Noon", "Morning"]);
}

#[tokio::test]
async fn test_create_event_requires_all_fields() {
    let app = TestApp::new().await;

    let (status, body) = app.json("POST", "/api/events", Some(json!({"name": "Standup", "startTime": "09:00"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = app.json("POST", "/api/events", Some(json!({"name": "  ", "startTime": "09:00", "endTime": "10:00"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, events) = app.json("GET", "/api/events", None).await;
    assert!(events.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": ")).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_event_overwrites_fields() {
    let app = TestApp::new().await;
    let created = app.create_event("Standup", "09:00", "09:15").await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app.json(
        "PUT",
        "/api/events",
        Some(json!({"id": id, "name": "Daily Standup", "startTime": "09:30", "endTime": "09:45"})),
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Daily Standup");
    assert_eq!(updated["start_time"], "09:30");
    assert_eq!(updated["end_time"], "09:45");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_missing_event_is_not_found_and_changes_nothing() {
    let app = TestApp::new().await;
    app.create_event("Standup", "09:00", "09:15").await;
    let (_, before) = app.json("GET", "/api/events", None).await;

    let (status, body) = app.json(
        "PUT",
        "/api/events",
        Some(json!({"id": 9999, "name": "Ghost", "startTime": "10:00", "endTime": "11:00"})),
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");

    let (_, after) = app.json("GET", "/api/events", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_requires_id() {
    let app = TestApp::new().await;

    let (status, _) = app.json(
        "PUT",
        "/api/events",
        Some(json!({"name": "Ghost", "startTime": "10:00", "endTime": "11:00"})),
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_event_is_idempotent() {
    let app = TestApp::new().await;
    let created = app.create_event("Standup", "09:00", "09:15").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.json("DELETE", &format!("/api/events?id={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = app.json("DELETE", &format!("/api/events?id={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, events) = app.json("GET", "/api/events", None).await;
    assert!(events.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_event_requires_valid_id() {
    let app = TestApp::new().await;

    let (status, body) = app.json("DELETE", "/api/events", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Event ID required");

    let (status, _) = app.json("DELETE", "/api/events?id=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_method_and_preflight_on_every_route() {
    let app = TestApp::new().await;

    for uri in ["/api/events", "/api/people", "/api/attendance", "/api/reports/attendance"] {
        let (status, body) = app.json("PATCH", uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "PATCH {}", uri);
        assert_eq!(body["error"], "Method not allowed");

        let response = app.request("OPTIONS", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "OPTIONS {}", uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty(), "OPTIONS {} returned a body", uri);
    }
}

#[tokio::test]
async fn test_malformed_query_string_is_a_json_validation_error() {
    let app = TestApp::new().await;

    let response = app.request("DELETE", "/api/events?id=1&id=2", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = parse_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));

    for uri in ["/api/people?id=1&id=2", "/api/attendance?id=1&id=2", "/api/attendance?eventId=1&eventId=2"] {
        let method = if uri.contains("eventId") { "GET" } else { "DELETE" };
        let (status, body) = app.json(method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert!(body["error"].is_string());
    }

    let (status, body) = app.json("GET", "/api/reports/attendance?format=csv&format=html", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_store_failure_is_a_server_error_with_message() {
    let app = TestApp::new().await;
    app.create_event("Standup", "09:00", "09:15").await;

    app.pool.close().await;

    let (status, body) = app.json("GET", "/api/events", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_cors_preflight_from_frontend_origin() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder()
            .method("OPTIONS")
            .uri("/api/events")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let methods = response.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap().to_str().unwrap();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let (status, body) = app.json("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_event_times_are_free_form() {
    let app = TestApp::new().await;

    let start = "2025-03-14T09:00:00.000-05:00 (America/New_York)";
    let end = "2025-03-14T09:15:00.000-05:00 (America/New_York)";
    let created = app.create_event("Standup", start, end).await;
    assert_eq!(created["start_time"], start);
    assert_eq!(created["end_time"], end);
}
