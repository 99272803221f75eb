//! DAO implementations.
//!
//! The trait lives in the parent `dao/` module. External storage engines
//! implement it in their own crates.

mod memory_dao;
mod null_dao;

pub use memory_dao::InMemoryDao;
pub use null_dao::NullDao;
