//! Project service trait definition.

use crate::dto::{CreateProjectRequest, RenameProjectRequest};
use async_trait::async_trait;
use bimbase_core::{AggregateResult, BimResult, Interface, Project, ProjectId};

/// Project service trait.
#[async_trait]
pub trait ProjectService: Interface + Send + Sync {
    /// Creates a new project.
    async fn create_project(&self, request: CreateProjectRequest) -> BimResult<Project>;

    /// Gets a project by ID.
    async fn get_project(&self, id: ProjectId) -> BimResult<Project>;

    /// Lists projects ordered by name, optionally restricted to one owner.
    async fn list_projects(&self, owner: Option<&str>) -> BimResult<Vec<Project>>;

    /// Renames a project.
    async fn rename_project(&self, id: ProjectId, request: RenameProjectRequest) -> BimResult<Project>;

    /// Archives a project.
    async fn archive_project(&self, id: ProjectId) -> BimResult<Project>;

    /// Inserts a project without an ID, updates one with an ID.
    async fn save_project(&self, project: Project) -> BimResult<Project>;

    /// Deletes a project. Returns whether anything was removed.
    async fn delete_project(&self, id: ProjectId) -> BimResult<bool>;

    /// Deletes every archived project of `owner`.
    async fn purge_archived(&self, owner: &str) -> BimResult<u64>;

    /// Counts projects per status.
    async fn count_by_status(&self) -> BimResult<AggregateResult>;
}
