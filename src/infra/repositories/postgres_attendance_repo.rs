use crate::domain::{
    models::attendance::{AttendanceRecord, AttendanceDetail, NewAttendance, DUPLICATE_ATTENDANCE},
    ports::AttendanceRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

const DETAIL_SELECT: &str = r#"
    SELECT a.id, a.event_id, a.person_id, a.marked_at, a.is_online,
           e.name AS event_name, p.name AS person_name
    FROM attendance a
    JOIN events e ON a.event_id = e.id
    JOIN people p ON a.person_id = p.id"#;

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepo {
    async fn list(&self) -> Result<Vec<AttendanceDetail>, AppError> {
        let sql = format!("{} ORDER BY a.marked_at DESC, a.id DESC", DETAIL_SELECT);
        sqlx::query_as::<_, AttendanceDetail>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<AttendanceDetail>, AppError> {
        let sql = format!("{} WHERE a.event_id = $1 ORDER BY a.marked_at DESC, a.id DESC", DETAIL_SELECT);
        sqlx::query_as::<_, AttendanceDetail>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create(&self, attendance: &NewAttendance) -> Result<AttendanceRecord, AppError> {
        // The UNIQUE(event_id, person_id) constraint settles concurrent marks.
        sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance (event_id, person_id, marked_at, is_online) VALUES ($1, $2, $3, $4) RETURNING id, event_id, person_id, marked_at, is_online",
        )
            .bind(attendance.event_id)
            .bind(attendance.person_id)
            .bind(attendance.marked_at)
            .bind(attendance.is_online)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, DUPLICATE_ATTENDANCE))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
