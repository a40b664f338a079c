use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Task, TaskInput, TaskRow, TaskStatus};

const TASK_COLUMNS: &str =
    "id, project_id, title, description, status, label, priority, due_date, created_at, updated_at";

/// Tasks have no owner column; callers check the parent project first.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, project_id: Uuid, input: &TaskInput) -> Result<Task, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<Task>, DatabaseError>;

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, DatabaseError>;

    /// `None` when the task does not exist under `project_id`.
    async fn update(
        &self,
        id: Uuid,
        project_id: Uuid,
        input: &TaskInput,
    ) -> Result<Option<Task>, DatabaseError>;

    async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Option<Task>, DatabaseError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode(row: Option<TaskRow>) -> Result<Option<Task>, DatabaseError> {
    row.map(Task::try_from).transpose()
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, project_id: Uuid, input: &TaskInput) -> Result<Task, DatabaseError> {
        let sql = format!(
            "INSERT INTO tasks (id, project_id, title, description, status, label, priority, due_date,
                                created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
             RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(project_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.label.map(|l| l.as_str()))
            .bind(input.priority.as_str())
            .bind(input.due_date)
            .fetch_one(&self.pool)
            .await?;
        Task::try_from(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        decode(row)
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE project_id = $1 ORDER BY created_at",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, TaskRow>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: Uuid,
        project_id: Uuid,
        input: &TaskInput,
    ) -> Result<Option<Task>, DatabaseError> {
        let sql = format!(
            "UPDATE tasks
             SET title = $3, description = $4, status = $5, label = $6, priority = $7,
                 due_date = $8, updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .bind(project_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.label.map(|l| l.as_str()))
            .bind(input.priority.as_str())
            .bind(input.due_date)
            .fetch_optional(&self.pool)
            .await?;
        decode(row)
    }

    async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Option<Task>, DatabaseError> {
        let sql = format!(
            "UPDATE tasks SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        decode(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
