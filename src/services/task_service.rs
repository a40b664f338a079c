use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{Task, TaskInput, TaskStatus};
use crate::database::{ProjectRepository, TaskRepository};
use crate::middleware::Identity;
use crate::ownership::{self, OwnershipError};

const TASK: &str = "task";

/// Every task operation re-checks that the parent project belongs to the caller.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { tasks, projects }
    }

    pub async fn create(
        &self,
        identity: &Identity,
        project_id: Uuid,
        input: TaskInput,
    ) -> Result<Task, ServiceError> {
        ownership::check_transitive(project_id, identity, self.projects.as_ref()).await?;
        let task = self.tasks.create(project_id, &input).await?;
        tracing::info!(task_id = %task.id, %project_id, "created task");
        Ok(task)
    }

    pub async fn list(&self, identity: &Identity, project_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        ownership::check_transitive(project_id, identity, self.projects.as_ref()).await?;
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Task, ServiceError> {
        let task = self
            .tasks
            .get(id)
            .await?
            .ok_or_else(|| OwnershipError::not_found(TASK, id))?;

        match ownership::check_transitive(task.project_id, identity, self.projects.as_ref()).await {
            Ok(()) => Ok(task),
            Err(OwnershipError::Database(e)) => Err(e.into()),
            // Report the task, not its project, to callers who do not own it.
            Err(_) => Err(OwnershipError::not_found(TASK, id).into()),
        }
    }

    pub async fn update(
        &self,
        identity: &Identity,
        project_id: Uuid,
        id: Uuid,
        input: TaskInput,
    ) -> Result<Task, ServiceError> {
        ownership::check_transitive(project_id, identity, self.projects.as_ref()).await?;
        self.tasks
            .update(id, project_id, &input)
            .await?
            .ok_or_else(|| OwnershipError::not_found(TASK, id).into())
    }

    pub async fn update_status(
        &self,
        identity: &Identity,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, ServiceError> {
        self.get(identity, id).await?;
        self.tasks
            .update_status(id, status)
            .await?
            .ok_or_else(|| OwnershipError::not_found(TASK, id).into())
    }

    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), ServiceError> {
        self.get(identity, id).await?;
        if !self.tasks.delete(id).await? {
            return Err(OwnershipError::not_found(TASK, id).into());
        }
        tracing::info!(task_id = %id, "deleted task");
        Ok(())
    }
}
