//! Domain entities.

mod project;

pub use project::*;
