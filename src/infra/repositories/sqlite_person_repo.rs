use crate::domain::{models::person::{Person, NewPerson}, ports::PersonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePersonRepo {
    pool: SqlitePool,
}

impl SqlitePersonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepo {
    async fn list(&self) -> Result<Vec<Person>, AppError> {
        sqlx::query_as::<_, Person>("SELECT id, name, created_at FROM people ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, person: &NewPerson) -> Result<Person, AppError> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO people (name, created_at) VALUES (?, ?) RETURNING id, name, created_at",
        )
            .bind(&person.name)
            .bind(person.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
