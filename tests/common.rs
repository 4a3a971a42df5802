#![allow(dead_code)]

use attendance_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::services::report,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_person_repo::SqlitePersonRepo,
        sqlite_attendance_repo::SqliteAttendanceRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::time::Duration;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        report_timezone: chrono_tz::UTC,
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let state = Arc::new(AppState {
            config: test_config(&db_url),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            person_repo: Arc::new(SqlitePersonRepo::new(pool.clone())),
            attendance_repo: Arc::new(SqliteAttendanceRepo::new(pool.clone())),
            templates: Arc::new(report::templates().unwrap()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a request and returns its status with the parsed JSON body.
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn create_event(&self, name: &str, start: &str, end: &str) -> Value {
        let (status, body) = self.json(
            "POST",
            "/api/events",
            Some(serde_json::json!({"name": name, "startTime": start, "endTime": end})),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "event creation failed: {}", body);
        body
    }

    pub async fn create_person(&self, name: &str) -> Value {
        let (status, body) = self.json("POST", "/api/people", Some(serde_json::json!({"name": name}))).await;
        assert_eq!(status, StatusCode::CREATED, "person creation failed: {}", body);
        body
    }

    pub async fn mark(&self, event_id: i64, person_id: i64, is_online: bool) -> (StatusCode, Value) {
        self.json(
            "POST",
            "/api/attendance",
            Some(serde_json::json!({"eventId": event_id, "personId": person_id, "isOnline": is_online})),
        ).await
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
