//! Value objects.

mod project_status;

pub use project_status::*;
