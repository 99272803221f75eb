//! # Bimbase Core
//!
//! Core types, traits, and error definitions for the Bimbase data access
//! layer. Every persisted entity type is described by the [`Entity`] trait
//! and queried through the [`Filter`], [`OrderBy`] and [`GroupExpression`]
//! descriptors defined here; the DAO contract itself lives in
//! `bimbase-repository`.

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod id;
pub mod query;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use aggregate::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use query::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
