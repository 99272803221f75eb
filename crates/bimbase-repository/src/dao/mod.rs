//! DAO (Data Access Object) layer.
//!
//! One generic contract, [`Dao`], covers every persisted entity type.
//! Implementations bind it to a single storage engine and are selected per
//! entity type by [`crate::DaoBinder`].

pub mod entity_dao;
pub mod r#impl;

pub use entity_dao::Dao;
pub use r#impl::{InMemoryDao, NullDao};
