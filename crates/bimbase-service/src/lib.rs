//! # Bimbase Service
//!
//! Application services for Bimbase. Services receive their DAOs through
//! their constructors and never know which storage backs them.

pub mod dto;
pub mod r#impl;
pub mod project_service;
pub mod retry;

pub use dto::*;
pub use r#impl::*;
pub use project_service::*;
pub use retry::RetryPolicy;
