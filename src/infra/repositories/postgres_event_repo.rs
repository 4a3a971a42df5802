use crate::domain::{models::event::{Event, EventFields, NewEvent}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, name, start_time, end_time, created_at FROM events ORDER BY start_time DESC, id DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, event: &NewEvent) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (name, start_time, end_time, created_at) VALUES ($1, $2, $3, $4) RETURNING id, name, start_time, end_time, created_at",
        )
            .bind(&event.fields.name)
            .bind(&event.fields.start_time)
            .bind(&event.fields.end_time)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, fields: &EventFields) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET name=$1, start_time=$2, end_time=$3 WHERE id=$4 RETURNING id, name, start_time, end_time, created_at"
        )
            .bind(&fields.name)
            .bind(&fields.start_time)
            .bind(&fields.end_time)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
