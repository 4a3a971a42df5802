use crate::domain::models::event::EventFields;
use crate::error::AppError;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

/// Accepts an id sent either as a JSON number or as a numeric string.
fn flexible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Number(n)) => Ok(Some(n)),
        Some(IdRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IdRepr::Text(s)) => s.trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id '{}'", s))),
    }
}

fn parse_query_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid id '{}'", s))),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl CreateEventRequest {
    pub fn into_fields(self) -> Result<EventFields, AppError> {
        match (self.name, self.start_time, self.end_time) {
            (Some(name), Some(start), Some(end)) => EventFields::new(name, start, end),
            _ => Err(AppError::Validation("Missing required fields".into())),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl UpdateEventRequest {
    pub fn into_parts(self) -> Result<(i64, EventFields), AppError> {
        let id = self.id.ok_or_else(|| AppError::Validation("Missing required fields".into()))?;
        let fields = CreateEventRequest {
            name: self.name,
            start_time: self.start_time,
            end_time: self.end_time,
        }
        .into_fields()?;
        Ok((id, fields))
    }
}

#[derive(Deserialize)]
pub struct CreatePersonRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    #[serde(default, deserialize_with = "flexible_id")]
    pub event_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub person_id: Option<i64>,
    pub is_online: Option<bool>,
}

/// `?id=` on DELETE requests.
#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require(&self, missing_msg: &str) -> Result<i64, AppError> {
        parse_query_id(self.id.as_deref())?
            .ok_or_else(|| AppError::Validation(missing_msg.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub event_id: Option<String>,
}

impl AttendanceQuery {
    pub fn event_id(&self) -> Result<Option<i64>, AppError> {
        parse_query_id(self.event_id.as_deref())
    }
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
    pub tz: Option<String>,
}
