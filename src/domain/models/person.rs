use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl NewPerson {
    pub fn new(name: String) -> Result<Self, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        Ok(Self {
            name,
            created_at: Utc::now(),
        })
    }
}
