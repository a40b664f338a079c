use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{Calendar, CalendarInput};
use crate::database::CalendarRepository;
use crate::middleware::Identity;
use crate::ownership::{self, Owned, OwnershipError};

pub struct CalendarService {
    calendars: Arc<dyn CalendarRepository>,
}

impl CalendarService {
    pub fn new(calendars: Arc<dyn CalendarRepository>) -> Self {
        Self { calendars }
    }

    pub async fn list(&self, identity: &Identity) -> Result<Vec<Calendar>, ServiceError> {
        Ok(self.calendars.list_by_user(identity.user_id).await?)
    }

    pub async fn create(&self, identity: &Identity, input: CalendarInput) -> Result<Calendar, ServiceError> {
        let calendar = self.calendars.create(identity.user_id, &input.normalized()).await?;
        tracing::info!(calendar_id = %calendar.id, user_id = %identity.user_id, "created calendar");
        Ok(calendar)
    }

    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Calendar, ServiceError> {
        let calendar = self.calendars.get(id).await?;
        Ok(ownership::check_found(calendar, Calendar::KIND, id, identity)?)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        input: CalendarInput,
    ) -> Result<Calendar, ServiceError> {
        self.get(identity, id).await?;
        self.calendars
            .update(id, identity.user_id, &input.normalized())
            .await?
            .ok_or_else(|| OwnershipError::not_found(Calendar::KIND, id).into())
    }

    /// Removes the calendar and every event in it.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), ServiceError> {
        self.get(identity, id).await?;
        if !self.calendars.delete(id, identity.user_id).await? {
            return Err(OwnershipError::not_found(Calendar::KIND, id).into());
        }
        tracing::info!(calendar_id = %id, user_id = %identity.user_id, "deleted calendar");
        Ok(())
    }
}
