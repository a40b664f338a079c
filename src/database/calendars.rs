use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Calendar, CalendarInput};
use crate::ownership::ParentLookup;
use crate::UserId;

const CALENDAR_COLUMNS: &str = "id, user_id, name, description, color, created_at, updated_at";

/// Calendars are owned directly and are the parent of events.
#[async_trait]
pub trait CalendarRepository: ParentLookup {
    async fn create(&self, user_id: UserId, input: &CalendarInput) -> Result<Calendar, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<Calendar>, DatabaseError>;

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Calendar>, DatabaseError>;

    /// `None` when no calendar with this id belongs to `user_id`.
    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &CalendarInput,
    ) -> Result<Option<Calendar>, DatabaseError>;

    /// Deletes the calendar and its events together. `false` when nothing matched.
    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
pub struct PgCalendarRepository {
    pool: PgPool,
}

impl PgCalendarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParentLookup for PgCalendarRepository {
    fn parent_kind(&self) -> &'static str {
        "calendar"
    }

    async fn owner_of(&self, parent_id: Uuid) -> Result<Option<UserId>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM calendars WHERE id = $1")
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}

#[async_trait]
impl CalendarRepository for PgCalendarRepository {
    async fn create(&self, user_id: UserId, input: &CalendarInput) -> Result<Calendar, DatabaseError> {
        let sql = format!(
            "INSERT INTO calendars (id, user_id, name, description, color, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
             RETURNING {}",
            CALENDAR_COLUMNS
        );
        let calendar = sqlx::query_as::<_, Calendar>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_one(&self.pool)
            .await?;
        Ok(calendar)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Calendar>, DatabaseError> {
        let sql = format!("SELECT {} FROM calendars WHERE id = $1", CALENDAR_COLUMNS);
        let calendar = sqlx::query_as::<_, Calendar>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(calendar)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Calendar>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM calendars WHERE user_id = $1 ORDER BY created_at",
            CALENDAR_COLUMNS
        );
        let calendars = sqlx::query_as::<_, Calendar>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(calendars)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &CalendarInput,
    ) -> Result<Option<Calendar>, DatabaseError> {
        let sql = format!(
            "UPDATE calendars SET name = $3, description = $4, color = $5, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {}",
            CALENDAR_COLUMNS
        );
        let calendar = sqlx::query_as::<_, Calendar>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .fetch_optional(&self.pool)
            .await?;
        Ok(calendar)
    }

    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM events WHERE calendar_id = $1
               AND EXISTS (SELECT 1 FROM calendars WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM calendars WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
