use std::sync::Arc;
use crate::domain::ports::{AttendanceRepository, EventRepository, PersonRepository};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub person_repo: Arc<dyn PersonRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub templates: Arc<Tera>,
}
