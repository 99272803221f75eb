//! # Bimbase Repository
//!
//! Generic data access layer:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn Dao<E>>      (DAO contract, one per entity type)
//! InMemoryDao<E> | NullDao<E> | external engines
//!   ↓
//! storage
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   dao/
//!     entity_dao.rs        ← Dao<E> trait
//!     impl/
//!       null_dao.rs        ← NullDao<E> (feature disabled / default binding)
//!       memory_dao.rs      ← InMemoryDao<E> (reference backend)
//!   binding.rs             ← DaoBinder: config → Arc<dyn Dao<E>>
//!   conformance.rs         ← contract checks runnable against any Dao<E>
//! ```

pub mod binding;
pub mod conformance;
pub mod dao;

pub use binding::DaoBinder;
pub use dao::{Dao, InMemoryDao, NullDao};
