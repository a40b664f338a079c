use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::ownership::Owned;
use crate::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Calendar {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Calendar {
    const KIND: &'static str = "calendar";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

/// Create/update payload. There is no `user_id` field: the owner
/// always comes from the authenticated identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CalendarInput {
    #[validate(length(max = 200), custom(function = "super::validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(custom(function = "super::validate_hex_color"))]
    pub color: Option<String>,
}

impl CalendarInput {
    /// Trim user-entered text in place.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.color = self.color.map(|c| c.trim().to_string());
        self
    }
}
