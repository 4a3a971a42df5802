use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{json::JsonBody, query::QueryParams};
use crate::api::dtos::{
    requests::{CreateEventRequest, UpdateEventRequest, IdQuery},
    responses::SuccessResponse,
};
use crate::domain::models::event::NewEvent;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    let created = state.event_repo.create(&NewEvent::new(fields)).await?;

    info!("Created event {}: {}", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (id, fields) = payload.into_parts()?;
    let updated = state.event_repo.update(id, &fields).await?;

    info!("Event updated: {}", id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = params.require("Event ID required")?;
    state.event_repo.delete(id).await?;

    info!("Event deleted: {}", id);
    Ok(Json(SuccessResponse::ok()))
}
