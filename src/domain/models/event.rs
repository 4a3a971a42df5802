use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of an event, checked before they reach any store.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventFields {
    pub fn new(name: String, start_time: String, end_time: String) -> Result<Self, AppError> {
        if name.trim().is_empty() || start_time.trim().is_empty() || end_time.trim().is_empty() {
            return Err(AppError::Validation("Missing required fields".into()));
        }
        Ok(Self { name, start_time, end_time })
    }
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub fields: EventFields,
    pub created_at: DateTime<Utc>,
}

impl NewEvent {
    pub fn new(fields: EventFields) -> Self {
        Self {
            fields,
            created_at: Utc::now(),
        }
    }
}
