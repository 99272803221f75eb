//! Grouping expressions and their results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};

/// An opaque aggregation query.
///
/// The contract does not interpret the text; each DAO implementation decides
/// which expressions it can evaluate and reports the rest as unsupported.
/// The constructors below produce the forms the bundled implementations
/// understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupExpression(String);

impl GroupExpression {
    /// Counts the entities matching the filter.
    #[must_use]
    pub fn count() -> Self {
        Self("count".to_string())
    }

    /// Counts the matching entities per distinct value of `field`.
    #[must_use]
    pub fn count_by(field: impl AsRef<str>) -> Self {
        Self(format!("count by {}", field.as_ref()))
    }

    /// Wraps a backend-specific expression verbatim.
    #[must_use]
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// Returns the expression text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GroupExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bucket of a grouped count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateGroup {
    /// Value of the grouping field shared by the bucket.
    pub key: Value,
    /// Number of entities in the bucket.
    pub count: u64,
}

/// Result of a grouping query.
///
/// The shape depends on the expression, so callers match on the variant
/// they expect for the query they issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum AggregateResult {
    /// No value.
    None,
    /// A single count.
    Count(u64),
    /// Per-key counts, ordered by key.
    Groups(Vec<AggregateGroup>),
    /// Any other backend-defined shape.
    Value(Value),
}

impl AggregateResult {
    /// Returns true for the "no value" sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the count if this is a [`AggregateResult::Count`].
    #[must_use]
    pub const fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the buckets if this is a [`AggregateResult::Groups`].
    #[must_use]
    pub fn as_groups(&self) -> Option<&[AggregateGroup]> {
        match self {
            Self::Groups(groups) => Some(groups),
            _ => None,
        }
    }

    /// Converts the result into a plain JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Count(n) => Value::from(n),
            Self::Groups(groups) => Value::Array(
                groups
                    .into_iter()
                    .map(|g| serde_json::json!({ "key": g.key, "count": g.count }))
                    .collect(),
            ),
            Self::Value(value) => value,
        }
    }
}
