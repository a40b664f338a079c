use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::database::models::{Project, ProjectInput};
use crate::database::ProjectRepository;
use crate::middleware::Identity;
use crate::ownership::{self, Owned, OwnershipError};

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn list(&self, identity: &Identity) -> Result<Vec<Project>, ServiceError> {
        Ok(self.projects.list_by_user(identity.user_id).await?)
    }

    pub async fn create(&self, identity: &Identity, input: ProjectInput) -> Result<Project, ServiceError> {
        let project = self.projects.create(identity.user_id, &input).await?;
        tracing::info!(project_id = %project.id, user_id = %identity.user_id, "created project");
        Ok(project)
    }

    pub async fn get(&self, identity: &Identity, id: Uuid) -> Result<Project, ServiceError> {
        let project = self.projects.get(id).await?;
        Ok(ownership::check_found(project, Project::KIND, id, identity)?)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        input: ProjectInput,
    ) -> Result<Project, ServiceError> {
        self.get(identity, id).await?;
        self.projects
            .update(id, identity.user_id, &input)
            .await?
            .ok_or_else(|| OwnershipError::not_found(Project::KIND, id).into())
    }

    /// Deletes the project together with all of its tasks.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), ServiceError> {
        self.get(identity, id).await?;
        if !self.projects.delete_cascade(id, identity.user_id).await? {
            return Err(OwnershipError::not_found(Project::KIND, id).into());
        }
        tracing::info!(project_id = %id, user_id = %identity.user_id, "deleted project");
        Ok(())
    }
}
