//! Single-file JSON store for local development.
//!
//! Holds all three tables in one document guarded by a mutex. Every
//! mutation is applied to a copy, written to disk, and only then made
//! visible, so a failed write leaves the in-memory state untouched.

use crate::domain::{
    models::{
        attendance::{AttendanceRecord, AttendanceDetail, NewAttendance, DUPLICATE_ATTENDANCE},
        event::{Event, EventFields, NewEvent},
        person::{Person, NewPerson},
    },
    ports::{AttendanceRepository, EventRepository, PersonRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NextIds {
    events: i64,
    people: i64,
    attendance: i64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self { events: 1, people: 1, attendance: 1 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Document {
    events: Vec<Event>,
    people: Vec<Person>,
    attendance: Vec<AttendanceRecord>,
    #[serde(rename = "nextId")]
    next_id: NextIds,
}

impl Document {
    fn detail(&self, record: &AttendanceRecord) -> Option<AttendanceDetail> {
        let event = self.events.iter().find(|e| e.id == record.event_id)?;
        let person = self.people.iter().find(|p| p.id == record.person_id)?;
        Some(AttendanceDetail {
            id: record.id,
            event_id: record.event_id,
            person_id: record.person_id,
            marked_at: record.marked_at,
            is_online: record.is_online,
            event_name: event.name.clone(),
            person_name: person.name.clone(),
        })
    }

    fn details<'a>(&self, records: impl Iterator<Item = &'a AttendanceRecord>) -> Vec<AttendanceDetail> {
        let mut rows: Vec<AttendanceDetail> = records.filter_map(|r| self.detail(r)).collect();
        rows.sort_by(|a, b| b.marked_at.cmp(&a.marked_at).then(b.id.cmp(&a.id)));
        rows
    }
}

pub struct JsonFileStore {
    path: PathBuf,
    doc: Mutex<Document>,
}

impl JsonFileStore {
    /// Opens the document at `path`, creating an empty one if the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let doc = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Storage(format!("Corrupt store file {}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Creating JSON store at {}", path.display());
                let doc = Document::default();
                write_document(&path, &doc).await?;
                doc
            }
            Err(e) => return Err(AppError::Storage(e.to_string())),
        };

        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    async fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> Result<T, AppError>) -> Result<T, AppError> {
        let mut guard = self.doc.lock().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        write_document(&self.path, &next).await?;
        *guard = next;
        Ok(out)
    }
}

async fn write_document(path: &Path, doc: &Document) -> Result<(), AppError> {
    let bytes = serde_json::to_vec_pretty(doc).map_err(|e| AppError::Storage(e.to_string()))?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", path.display(), e)))
}

#[async_trait]
impl EventRepository for JsonFileStore {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let mut events = self.doc.lock().await.events.clone();
        events.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn create(&self, event: &NewEvent) -> Result<Event, AppError> {
        self.mutate(|doc| {
            let created = Event {
                id: doc.next_id.events,
                name: event.fields.name.clone(),
                start_time: event.fields.start_time.clone(),
                end_time: event.fields.end_time.clone(),
                created_at: event.created_at,
            };
            doc.next_id.events += 1;
            doc.events.push(created.clone());
            Ok(created)
        }).await
    }

    async fn update(&self, id: i64, fields: &EventFields) -> Result<Event, AppError> {
        self.mutate(|doc| {
            let event = doc.events.iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
            event.name = fields.name.clone();
            event.start_time = fields.start_time.clone();
            event.end_time = fields.end_time.clone();
            Ok(event.clone())
        }).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.mutate(|doc| {
            doc.events.retain(|e| e.id != id);
            doc.attendance.retain(|a| a.event_id != id);
            Ok(())
        }).await
    }
}

#[async_trait]
impl PersonRepository for JsonFileStore {
    async fn list(&self) -> Result<Vec<Person>, AppError> {
        let mut people = self.doc.lock().await.people.clone();
        people.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(people)
    }

    async fn create(&self, person: &NewPerson) -> Result<Person, AppError> {
        self.mutate(|doc| {
            let created = Person {
                id: doc.next_id.people,
                name: person.name.clone(),
                created_at: person.created_at,
            };
            doc.next_id.people += 1;
            doc.people.push(created.clone());
            Ok(created)
        }).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.mutate(|doc| {
            doc.people.retain(|p| p.id != id);
            doc.attendance.retain(|a| a.person_id != id);
            Ok(())
        }).await
    }
}

#[async_trait]
impl AttendanceRepository for JsonFileStore {
    async fn list(&self) -> Result<Vec<AttendanceDetail>, AppError> {
        let doc = self.doc.lock().await;
        Ok(doc.details(doc.attendance.iter()))
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<AttendanceDetail>, AppError> {
        let doc = self.doc.lock().await;
        Ok(doc.details(doc.attendance.iter().filter(|a| a.event_id == event_id)))
    }

    async fn create(&self, attendance: &NewAttendance) -> Result<AttendanceRecord, AppError> {
        self.mutate(|doc| {
            let event_exists = doc.events.iter().any(|e| e.id == attendance.event_id);
            let person_exists = doc.people.iter().any(|p| p.id == attendance.person_id);
            if !event_exists || !person_exists {
                return Err(AppError::Validation("Event or person does not exist".into()));
            }

            let already_marked = doc.attendance.iter()
                .any(|a| a.event_id == attendance.event_id && a.person_id == attendance.person_id);
            if already_marked {
                return Err(AppError::Duplicate(DUPLICATE_ATTENDANCE.into()));
            }

            let created = AttendanceRecord {
                id: doc.next_id.attendance,
                event_id: attendance.event_id,
                person_id: attendance.person_id,
                marked_at: attendance.marked_at,
                is_online: attendance.is_online,
            };
            doc.next_id.attendance += 1;
            doc.attendance.push(created.clone());
            Ok(created)
        }).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.mutate(|doc| {
            doc.attendance.retain(|a| a.id != id);
            Ok(())
        }).await
    }
}
