//! Application configuration structures.

use bimbase_core::telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Storage binding configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "bimbase".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Storage engine bound behind an entity's DAO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local in-memory store.
    #[default]
    Memory,
    /// Feature disabled: reads are empty and writes are discarded.
    Disabled,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Storage binding configuration.
///
/// ```toml
/// [storage]
/// default_backend = "memory"
///
/// [storage.entities]
/// Project = "disabled"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Backend used for entity types without an explicit entry.
    #[serde(default)]
    pub default_backend: StorageBackend,

    /// Per-entity overrides keyed by resource name.
    #[serde(default)]
    pub entities: HashMap<String, StorageBackend>,

    /// Retry policy for reads failing with `StorageUnavailable`.
    #[serde(default)]
    pub read_retry: RetryConfig,
}

/// Retry settings for transient storage failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one. `1` disables retrying.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound for the delay between attempts, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 50,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryConfig {
    /// Returns the initial delay as a Duration.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Returns the maximum delay as a Duration.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl StorageConfig {
    /// Returns the backend bound for the given resource.
    ///
    /// Resource names match case-insensitively, since keys arriving through
    /// environment variables are lowercased.
    #[must_use]
    pub fn backend_for(&self, resource: &str) -> StorageBackend {
        self.entities
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(resource))
            .map_or(self.default_backend, |(_, backend)| *backend)
    }

    /// Overrides the backend for one resource.
    #[must_use]
    pub fn with_entity(mut self, resource: impl Into<String>, backend: StorageBackend) -> Self {
        self.entities.insert(resource.into(), backend);
        self
    }
}
