use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Event, EventUpdate, NewEvent};
use crate::UserId;

const EVENT_COLUMNS: &str = "id, calendar_id, user_id, title, description, start_time, end_time, \
                             location, color, created_at, updated_at";

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, user_id: UserId, event: &NewEvent) -> Result<Event, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<Event>, DatabaseError>;

    /// Events of `user_id` in any of `calendar_ids` overlapping `[start, end)`,
    /// ordered by start time.
    async fn list(
        &self,
        user_id: UserId,
        calendar_ids: &[Uuid],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, DatabaseError>;

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        event: &EventUpdate,
    ) -> Result<Option<Event>, DatabaseError>;

    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, user_id: UserId, event: &NewEvent) -> Result<Event, DatabaseError> {
        let sql = format!(
            "INSERT INTO events (id, calendar_id, user_id, title, description, start_time, end_time,
                                 location, color, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
             RETURNING {}",
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(Uuid::new_v4())
            .bind(event.calendar_id)
            .bind(user_id)
            .bind(event.title.trim())
            .bind(&event.description)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.location)
            .bind(&event.color)
            .fetch_one(&self.pool)
            .await?;
        Ok(event)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn list(
        &self,
        user_id: UserId,
        calendar_ids: &[Uuid],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM events
             WHERE user_id = $1 AND calendar_id = ANY($2)
               AND start_time < $4 AND end_time > $3
             ORDER BY start_time",
            EVENT_COLUMNS
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(user_id)
            .bind(calendar_ids)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        event: &EventUpdate,
    ) -> Result<Option<Event>, DatabaseError> {
        let sql = format!(
            "UPDATE events
             SET title = $3, description = $4, start_time = $5, end_time = $6,
                 location = $7, color = $8, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {}",
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(event.title.trim())
            .bind(&event.description)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.location)
            .bind(&event.color)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
