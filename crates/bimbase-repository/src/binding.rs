//! Storage binding: chooses the DAO implementation per entity type.

use crate::dao::{Dao, InMemoryDao, NullDao};
use bimbase_config::{StorageBackend, StorageConfig};
use bimbase_core::Entity;
use std::sync::Arc;
use tracing::info;

/// Builds `Arc<dyn Dao<E>>` instances from the storage configuration.
///
/// The binder is the only place that knows which implementation backs an
/// entity type; consumers receive the DAO through their constructors.
#[derive(Debug, Clone, Default)]
pub struct DaoBinder {
    config: StorageConfig,
}

impl DaoBinder {
    /// Creates a binder over the given storage configuration.
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Returns the backend configured for `E`.
    #[must_use]
    pub fn backend_for<E: Entity>(&self) -> StorageBackend {
        self.config.backend_for(E::RESOURCE)
    }

    /// Creates the DAO configured for `E`.
    #[must_use]
    pub fn bind<E: Entity>(&self) -> Arc<dyn Dao<E>> {
        let backend = self.backend_for::<E>();
        info!(resource = E::RESOURCE, %backend, "Binding DAO");
        match backend {
            StorageBackend::Memory => Arc::new(InMemoryDao::<E>::new()),
            StorageBackend::Disabled => Arc::new(NullDao::<E>::new()),
        }
    }
}
