//! Shared fixtures for DAO integration tests.
#![allow(dead_code)]

use bimbase_core::{Entity, Identifier, Project};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Numeric identifier, to exercise the contract with a non-UUID id type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelId(pub u64);

impl Identifier for ModelId {
    fn generate() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An IFC model file attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfcModel {
    pub id: Option<ModelId>,
    pub project: String,
    pub discipline: String,
    pub revision: u32,
}

impl IfcModel {
    pub fn new(project: &str, discipline: &str, revision: u32) -> Self {
        Self {
            id: None,
            project: project.to_string(),
            discipline: discipline.to_string(),
            revision,
        }
    }
}

impl Entity for IfcModel {
    const RESOURCE: &'static str = "IfcModel";
    type Id = ModelId;

    fn id(&self) -> Option<&ModelId> {
        self.id.as_ref()
    }

    fn with_id(mut self, id: ModelId) -> Self {
        self.id = Some(id);
        self
    }
}

pub fn project(name: &str, owner: &str) -> Project {
    Project::new(name, owner)
}
