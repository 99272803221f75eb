//! Project entity.

use super::super::value_objects::ProjectStatus;
use crate::validation::rules;
use crate::{BimError, BimResult, Entity, ProjectId, ValidateExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A BIM project: the top-level container models and documents belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Project {
    /// Identifier, `None` until the project has been persisted.
    pub id: Option<ProjectId>,

    /// Display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Free-form description.
    #[validate(length(max = 2048))]
    pub description: Option<String>,

    /// Owning account.
    #[validate(length(min = 1, max = 64))]
    pub owner: String,

    /// Lifecycle status.
    pub status: ProjectStatus,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new, not yet persisted project.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            description: None,
            owner: owner.into(),
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Renames the project.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Archives the project.
    pub fn archive(&mut self) {
        self.status = ProjectStatus::Archived;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Project {
    const RESOURCE: &'static str = "Project";
    type Id = ProjectId;

    fn id(&self) -> Option<&ProjectId> {
        self.id.as_ref()
    }

    fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    fn validate_entity(&self) -> BimResult<()> {
        self.validate_request()?;
        rules::not_blank(&self.name)
            .map_err(|_| BimError::constraint("name: must not be blank"))?;
        Ok(())
    }
}
