use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{json::JsonBody, query::QueryParams};
use crate::api::dtos::{
    requests::{AttendanceQuery, CreateAttendanceRequest, IdQuery},
    responses::SuccessResponse,
};
use crate::domain::models::attendance::NewAttendance;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_attendance(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<AttendanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let records = match params.event_id()? {
        Some(event_id) => state.attendance_repo.list_by_event(event_id).await?,
        None => state.attendance_repo.list().await?,
    };
    Ok(Json(records))
}

pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (event_id, person_id) = match (payload.event_id, payload.person_id) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(AppError::Validation("Event ID and Person ID required".into())),
    };

    let attendance = NewAttendance::new(event_id, person_id, payload.is_online.unwrap_or(false));
    let created = state.attendance_repo.create(&attendance).await?;

    info!(event_id, person_id, online = created.is_online, "Attendance marked");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn unmark_attendance(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = params.require("Attendance ID required")?;
    state.attendance_repo.delete(id).await?;

    info!("Attendance record deleted: {}", id);
    Ok(Json(SuccessResponse::ok()))
}
