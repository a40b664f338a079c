use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::database::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[serde(rename = "backlog")]
    Backlog,
    #[default]
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "canceled")]
    Canceled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
            TaskStatus::Canceled => "canceled",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(TaskStatus::Backlog),
            "todo" => Ok(TaskStatus::Todo),
            "in progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "canceled" => Ok(TaskStatus::Canceled),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskLabel {
    Bug,
    Feature,
    Documentation,
}

impl TaskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskLabel::Bug => "bug",
            TaskLabel::Feature => "feature",
            TaskLabel::Documentation => "documentation",
        }
    }
}

impl FromStr for TaskLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bug" => Ok(TaskLabel::Bug),
            "feature" => Ok(TaskLabel::Feature),
            "documentation" => Ok(TaskLabel::Documentation),
            other => Err(format!("unknown task label '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(format!("unknown task priority '{}'", other)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks carry no owner of their own; ownership is resolved through the project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub label: Option<TaskLabel>,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `tasks` row; the enum columns are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub label: Option<String>,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DatabaseError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let label = match row.label.as_deref() {
            None | Some("") => None,
            Some(l) => Some(l.parse().map_err(DatabaseError::Decode)?),
        };

        Ok(Task {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            description: row.description,
            status: row.status.parse().map_err(DatabaseError::Decode)?,
            label,
            priority: row.priority.parse().map_err(DatabaseError::Decode)?,
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Create/update payload. Unknown enum values fail deserialization (400).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(max = 300), custom(function = "super::validate_not_blank"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub label: Option<TaskLabel>,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_frontend_spelling() {
        assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), "in progress");
        assert_eq!("in progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("in_progress".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn input_defaults() {
        let input: TaskInput = serde_json::from_str(r#"{"title":"Write docs"}"#).unwrap();
        assert_eq!(input.status, TaskStatus::Todo);
        assert_eq!(input.priority, TaskPriority::Medium);
        assert_eq!(input.label, None);
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert!(serde_json::from_str::<TaskInput>(r#"{"title":"x","priority":"urgent"}"#).is_err());
    }

    #[test]
    fn row_with_bad_status_is_a_decode_error() {
        let now = Utc::now();
        let row = TaskRow {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "t".to_string(),
            description: None,
            status: "later".to_string(),
            label: Some(String::new()),
            priority: "low".to_string(),
            due_date: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(Task::try_from(row), Err(DatabaseError::Decode(_))));
    }
}
