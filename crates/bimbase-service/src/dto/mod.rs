//! Data Transfer Objects (DTOs).

mod project_dto;

pub use project_dto::*;
