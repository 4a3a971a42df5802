use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use crate::state::AppState;
use crate::api::dtos::requests::ReportQuery;
use crate::api::extractors::query::QueryParams;
use crate::domain::services::report::{self, ReportFormat};
use crate::error::AppError;
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::info;

pub async fn export_attendance(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ReportQuery>,
) -> Result<Response, AppError> {
    let format: ReportFormat = params.format.as_deref().unwrap_or("html").parse()?;

    let tz = match params.tz.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.parse::<Tz>()
            .map_err(|_| AppError::Validation(format!("Unknown time zone '{}'", name)))?,
        None => state.config.report_timezone,
    };

    let records = state.attendance_repo.list().await?;
    let rendered = report::render(&state.templates, &records, format, tz, Utc::now())?;

    let disposition = match format {
        ReportFormat::Html => format!("inline; filename=\"{}\"", rendered.file_name),
        ReportFormat::Csv => format!("attachment; filename=\"{}\"", rendered.file_name),
    };

    info!("Exported {} attendance record(s) as {}", records.len(), format.extension());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.body,
    ).into_response())
}
