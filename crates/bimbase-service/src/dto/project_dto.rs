//! Project-related DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(max = 2048, message = "Description cannot exceed 2048 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Owner must be 1-64 characters"))]
    pub owner: String,
}

impl CreateProjectRequest {
    /// Creates a request without a description.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            owner: owner.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request to rename a project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameProjectRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,
}
