use axum::http::StatusCode;
use crate::error::AppError;

/// Bare OPTIONS requests get an empty 200; CORS negotiation itself happens in the layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
