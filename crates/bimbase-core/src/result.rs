//! Result type aliases for Bimbase.

use crate::BimError;

/// A specialized `Result` type for Bimbase operations.
pub type BimResult<T> = Result<T, BimError>;
