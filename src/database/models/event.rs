use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::ownership::Owned;
use crate::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Event {
    const KIND: &'static str = "event";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

fn check_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<(), ValidationError> {
    if start < end {
        return Ok(());
    }
    let mut err = ValidationError::new("time_range");
    err.message = Some("start_time must be before end_time".into());
    Err(err)
}

fn validate_new_event_range(event: &NewEvent) -> Result<(), ValidationError> {
    check_range(&event.start_time, &event.end_time)
}

fn validate_update_range(event: &EventUpdate) -> Result<(), ValidationError> {
    check_range(&event.start_time, &event.end_time)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_new_event_range"))]
pub struct NewEvent {
    pub calendar_id: Uuid,
    #[validate(length(max = 300), custom(function = "super::validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(max = 500))]
    pub location: Option<String>,
    #[validate(custom(function = "super::validate_hex_color"))]
    pub color: Option<String>,
}

/// Events stay in the calendar they were created in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_update_range"))]
pub struct EventUpdate {
    #[validate(length(max = 300), custom(function = "super::validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(max = 500))]
    pub location: Option<String>,
    #[validate(custom(function = "super::validate_hex_color"))]
    pub color: Option<String>,
}

/// `GET /api/events?calendar_ids=a,b&start=...&end=...`
#[derive(Debug, Clone, Deserialize)]
pub struct EventQuery {
    pub calendar_ids: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl EventQuery {
    pub fn parse_calendar_ids(&self) -> Result<Vec<Uuid>, String> {
        self.calendar_ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Uuid::parse_str(s).map_err(|_| format!("invalid calendar id '{}'", s)))
            .collect()
    }
}
