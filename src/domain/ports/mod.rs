use crate::domain::models::{
    event::{Event, EventFields, NewEvent},
    person::{Person, NewPerson},
    attendance::{AttendanceRecord, AttendanceDetail, NewAttendance},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, latest start time first.
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn create(&self, event: &NewEvent) -> Result<Event, AppError>;
    /// Fails with `AppError::NotFound` when no event has `id`.
    async fn update(&self, id: i64, fields: &EventFields) -> Result<Event, AppError>;
    /// Removes the event and its attendance. Missing ids are not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All people, alphabetically.
    async fn list(&self) -> Result<Vec<Person>, AppError>;
    async fn create(&self, person: &NewPerson) -> Result<Person, AppError>;
    /// Removes the person and their attendance. Missing ids are not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Joined records, most recently marked first.
    async fn list(&self) -> Result<Vec<AttendanceDetail>, AppError>;
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<AttendanceDetail>, AppError>;
    /// Fails with `AppError::Duplicate` if the (event, person) pair is already marked.
    async fn create(&self, attendance: &NewAttendance) -> Result<AttendanceRecord, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
