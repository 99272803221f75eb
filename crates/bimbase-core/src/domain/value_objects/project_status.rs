//! Project status value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Project is being worked on.
    #[default]
    Active,
    /// Project is read-only and hidden from default listings.
    Archived,
}

impl ProjectStatus {
    /// Checks if the project accepts changes.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// All possible statuses.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Active, Self::Archived]
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl From<ProjectStatus> for serde_json::Value {
    fn from(status: ProjectStatus) -> Self {
        Self::String(status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serialized_form() {
        for status in ProjectStatus::all() {
            let serialized = serde_json::to_value(status).unwrap();
            assert_eq!(serialized, serde_json::Value::from(status));
        }
    }

    #[test]
    fn test_default_is_active() {
        assert!(ProjectStatus::default().is_active());
        assert!(!ProjectStatus::Archived.is_active());
    }
}
