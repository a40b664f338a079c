use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{Event, EventQuery, EventUpdate, NewEvent};
use crate::database::{CalendarRepository, EventRepository};
use crate::middleware::Identity;
use crate::ownership::{self, Owned, OwnershipError};

/// Events are owned directly, and may only be created in (or listed from)
/// calendars the caller owns.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    calendars: Arc<dyn CalendarRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, calendars: Arc<dyn CalendarRepository>) -> Self {
        Self { events, calendars }
    }

    pub async fn create(&self, identity: &Identity, event: NewEvent) -> Result<Event, ServiceError> {
        ownership::check_transitive(event.calendar_id, identity, self.calendars.as_ref()).await?;
        let event = self.events.create(identity.user_id, &event).await?;
        tracing::info!(event_id = %event.id, calendar_id = %event.calendar_id, "created event");
        Ok(event)
    }

    pub async fn list(&self, identity: &Identity, query: &EventQuery) -> Result<Vec<Event>, ServiceError> {
        let calendar_ids = query.parse_calendar_ids().map_err(ServiceError::BadRequest)?;
        if calendar_ids.is_empty() {
            return Err(ServiceError::BadRequest("calendar_ids must not be empty".to_string()));
        }
        if query.start >= query.end {
            return Err(ServiceError::BadRequest("start must be before end".to_string()));
        }

        for calendar_id in &calendar_ids {
            ownership::check_transitive(*calendar_id, identity, self.calendars.as_ref()).await?;
        }

        Ok(self
            .events
            .list(identity.user_id, &calendar_ids, query.start, query.end)
            .await?)
    }

    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Event, ServiceError> {
        let event = self.events.get(id).await?;
        Ok(ownership::check_found(event, Event::KIND, id, identity)?)
    }

    pub async fn update(&self, identity: &Identity, id: Uuid, update: EventUpdate) -> Result<Event, ServiceError> {
        self.get(identity, id).await?;
        self.events
            .update(id, identity.user_id, &update)
            .await?
            .ok_or_else(|| OwnershipError::not_found(Event::KIND, id).into())
    }

    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), ServiceError> {
        self.get(identity, id).await?;
        if !self.events.delete(id, identity.user_id).await? {
            return Err(OwnershipError::not_found(Event::KIND, id).into());
        }
        Ok(())
    }
}
