//! Project service implementation.

use crate::dto::{CreateProjectRequest, RenameProjectRequest};
use crate::project_service::ProjectService;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use bimbase_config::StorageConfig;
use bimbase_core::{
    AggregateResult, BimError, BimResult, Entity, Filter, GroupExpression, OrderBy, Project,
    ProjectId, ProjectStatus, ValidateExt,
};
use bimbase_repository::{Dao, DaoBinder};
use std::sync::Arc;
use tracing::{debug, info};

/// Project service backed by whatever `Dao<Project>` it is given.
///
/// Reads are retried while the storage reports itself unavailable. Writes
/// are attempted once.
pub struct ProjectServiceImpl {
    projects: Arc<dyn Dao<Project>>,
    retry: RetryPolicy,
}

impl ProjectServiceImpl {
    /// Creates a new project service.
    pub fn new(projects: Arc<dyn Dao<Project>>) -> Self {
        Self {
            projects,
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a service over the DAO the binder selects for projects.
    pub fn from_binder(binder: &DaoBinder) -> Self {
        Self::new(binder.bind::<Project>())
    }

    /// Creates a service from the storage configuration, including its
    /// read retry settings.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::from_binder(&DaoBinder::new(config.clone()))
            .with_retry(RetryPolicy::from_config(&config.read_retry))
    }

    /// Replaces the project DAO.
    #[must_use]
    pub fn with_dao(mut self, projects: Arc<dyn Dao<Project>>) -> Self {
        self.projects = projects;
        self
    }

    /// Replaces the read retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn load(&self, id: ProjectId) -> BimResult<Project> {
        self.retry
            .execute("select_by_id", || self.projects.select_by_id(&id))
            .await?
            .ok_or_else(|| BimError::not_found(Project::RESOURCE, id))
    }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    async fn create_project(&self, request: CreateProjectRequest) -> BimResult<Project> {
        debug!("Creating project: {}", request.name);

        request.validate_request()?;

        let mut project = Project::new(request.name, request.owner);
        if let Some(description) = request.description {
            project = project.with_description(description);
        }
        project.validate_entity()?;

        let saved = self.projects.insert(&project).await?;

        match saved.id {
            Some(id) => info!("Project created: {}", id),
            None => debug!("Project storage disabled, nothing stored"),
        }
        Ok(saved)
    }

    async fn get_project(&self, id: ProjectId) -> BimResult<Project> {
        debug!("Getting project: {}", id);
        self.load(id).await
    }

    async fn list_projects(&self, owner: Option<&str>) -> BimResult<Vec<Project>> {
        debug!("Listing projects, owner: {:?}", owner);

        let filter = match owner {
            Some(owner) => Filter::new().eq("owner", owner),
            None => Filter::new(),
        };
        // Project ids are UUIDv7, so their text order is creation order.
        let order_by = OrderBy::by("name").then_by("id");

        self.retry
            .execute("select", || self.projects.select(&filter, &order_by))
            .await
    }

    async fn rename_project(&self, id: ProjectId, request: RenameProjectRequest) -> BimResult<Project> {
        debug!("Renaming project: {} -> {}", id, request.name);

        request.validate_request()?;

        let mut project = self.load(id).await?;
        project.rename(request.name);
        project.validate_entity()?;

        let updated = self.projects.update(&project).await?;

        info!("Project renamed: {}", id);
        Ok(updated)
    }

    async fn archive_project(&self, id: ProjectId) -> BimResult<Project> {
        debug!("Archiving project: {}", id);

        let mut project = self.load(id).await?;
        if project.status == ProjectStatus::Archived {
            return Ok(project);
        }
        project.archive();

        let updated = self.projects.update(&project).await?;

        info!("Project archived: {}", id);
        Ok(updated)
    }

    async fn save_project(&self, project: Project) -> BimResult<Project> {
        debug!("Saving project: {:?}", project.id);

        project.validate_entity()?;
        self.projects.insert_or_update(&project).await
    }

    async fn delete_project(&self, id: ProjectId) -> BimResult<bool> {
        debug!("Deleting project: {}", id);

        let deleted = self.projects.delete(&id).await?;
        if deleted {
            info!("Project deleted: {}", id);
        }
        Ok(deleted)
    }

    async fn purge_archived(&self, owner: &str) -> BimResult<u64> {
        debug!("Purging archived projects of {}", owner);

        let filter = Filter::new()
            .eq("owner", owner)
            .eq("status", ProjectStatus::Archived);
        let removed = self.projects.delete_where(&filter).await?;

        info!("Purged {} archived projects of {}", removed, owner);
        Ok(removed)
    }

    async fn count_by_status(&self) -> BimResult<AggregateResult> {
        let expression = GroupExpression::count_by("status");
        let filter = Filter::new();

        self.retry
            .execute("select_group", || self.projects.select_group(&expression, &filter))
            .await
    }
}

impl std::fmt::Debug for ProjectServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectServiceImpl")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
