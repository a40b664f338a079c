use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Project, ProjectInput};
use crate::ownership::ParentLookup;
use crate::UserId;

/// Projects are owned directly and are the parent of tasks.
#[async_trait]
pub trait ProjectRepository: ParentLookup {
    async fn create(&self, user_id: UserId, input: &ProjectInput) -> Result<Project, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<Project>, DatabaseError>;

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Project>, DatabaseError>;

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, DatabaseError>;

    /// Tasks first, then the project, in one transaction.
    async fn delete_cascade(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParentLookup for PgProjectRepository {
    fn parent_kind(&self) -> &'static str {
        "project"
    }

    async fn owner_of(&self, parent_id: Uuid) -> Result<Option<UserId>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM projects WHERE id = $1")
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, user_id: UserId, input: &ProjectInput) -> Result<Project, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, user_id, name, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW(), NOW())
             RETURNING id, user_id, name, description, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, user_id, name, description, created_at, updated_at FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Project>, DatabaseError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, user_id, name, description, created_at, updated_at
             FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, DatabaseError> {
        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = $3, description = $4, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, name, description, created_at, updated_at",
        )
        .bind(id)
        .bind(user_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_cascade(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM projects WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        let tasks = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(project_id = %id, tasks, "deleted project with its tasks");
        Ok(true)
    }
}
