pub mod sqlite_event_repo;
pub mod sqlite_person_repo;
pub mod sqlite_attendance_repo;

pub mod postgres_event_repo;
pub mod postgres_person_repo;
pub mod postgres_attendance_repo;

pub mod json_file_store;
