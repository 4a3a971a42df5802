use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub event_id: i64,
    pub person_id: i64,
    pub marked_at: DateTime<Utc>,
    #[serde(default)]
    pub is_online: bool,
}

/// Attendance row joined with the names of its event and person.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct AttendanceDetail {
    pub id: i64,
    pub event_id: i64,
    pub person_id: i64,
    pub marked_at: DateTime<Utc>,
    pub is_online: bool,
    pub event_name: String,
    pub person_name: String,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub event_id: i64,
    pub person_id: i64,
    pub is_online: bool,
    pub marked_at: DateTime<Utc>,
}

impl NewAttendance {
    pub fn new(event_id: i64, person_id: i64, is_online: bool) -> Self {
        Self {
            event_id,
            person_id,
            is_online,
            marked_at: Utc::now(),
        }
    }
}

pub const DUPLICATE_ATTENDANCE: &str = "Attendance already marked";
