use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::ownership::Owned;
use crate::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> &UserId {
        &self.user_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(max = 200), custom(function = "super::validate_not_blank"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
