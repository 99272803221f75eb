//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `project_service.rs`).

pub mod project_service_impl;

pub use project_service_impl::ProjectServiceImpl;
