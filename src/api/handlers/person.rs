use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{json::JsonBody, query::QueryParams};
use crate::api::dtos::{
    requests::{CreatePersonRequest, IdQuery},
    responses::SuccessResponse,
};
use crate::domain::models::person::NewPerson;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let people = state.person_repo.list().await?;
    Ok(Json(people))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreatePersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let person = NewPerson::new(payload.name.unwrap_or_default())?;
    let created = state.person_repo.create(&person).await?;

    info!("Registered person {}: {}", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = params.require("Person ID required")?;
    state.person_repo.delete(id).await?;

    info!("Person deleted: {}", id);
    Ok(Json(SuccessResponse::ok()))
}
