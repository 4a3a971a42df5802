use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::config::Config;
use crate::state::AppState;
use crate::api::handlers::{health, event, person, attendance, report, preflight};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
    cors::{AllowOrigin, Any, CorsLayer},
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route(
            "/events",
            get(event::list_events)
                .post(event::create_event)
                .put(event::update_event)
                .delete(event::delete_event)
                .options(preflight::preflight)
                .fallback(preflight::method_not_allowed),
        )
        .route(
            "/people",
            get(person::list_people)
                .post(person::create_person)
                .delete(person::delete_person)
                .options(preflight::preflight)
                .fallback(preflight::method_not_allowed),
        )
        .route(
            "/attendance",
            get(attendance::list_attendance)
                .post(attendance::mark_attendance)
                .delete(attendance::unmark_attendance)
                .options(preflight::preflight)
                .fallback(preflight::method_not_allowed),
        )
        .route(
            "/reports/attendance",
            get(report::export_attendance)
                .options(preflight::preflight)
                .fallback(preflight::method_not_allowed),
        );

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

/// Lets the separately hosted front-end call the API.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config.cors_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
