use crate::domain::{models::person::{Person, NewPerson}, ports::PersonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPersonRepo {
    pool: PgPool,
}

impl PostgresPersonRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepo {
    async fn list(&self) -> Result<Vec<Person>, AppError> {
        sqlx::query_as::<_, Person>("SELECT id, name, created_at FROM people ORDER BY name ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, person: &NewPerson) -> Result<Person, AppError> {
        sqlx::query_as::<_, Person>(
            "INSERT INTO people (name, created_at) VALUES ($1, $2) RETURNING id, name, created_at",
        )
            .bind(&person.name)
            .bind(person.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
