//! Filter and ordering descriptors passed into DAO read operations.

use crate::Entity;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Equality filter keyed by field name.
///
/// All entries are AND-ed together; an empty filter places no constraint.
/// There is no range, OR or negation support. A field missing from an
/// entity compares equal to `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    conditions: BTreeMap<String, Value>,
}

impl Filter {
    /// Creates an empty filter matching every entity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality constraint, replacing any previous one on the same field.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    /// Creates a filter selecting the entity with the given identifier.
    ///
    /// Relies on the identifier being serialized under the `id` field.
    #[must_use]
    pub fn by_id<E: Entity>(id: &E::Id) -> Self
    where
        E::Id: Into<Value>,
    {
        Self::new().eq("id", id.clone())
    }

    /// Returns the expected value for a field, if constrained.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.conditions.get(field)
    }

    /// Returns the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if the filter places no constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterates over `(field, expected value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the entity satisfies every constraint.
    #[must_use]
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            let actual = entity.field(field).unwrap_or(Value::Null);
            values_equal(&actual, expected)
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Ordered list of sort keys, primary key first.
///
/// There is no direction flag: every key sorts ascending. Entities that
/// compare equal on all keys keep their relative input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBy {
    fields: Vec<String>,
}

impl OrderBy {
    /// No ordering; the implementation picks the order.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Orders by a single field.
    #[must_use]
    pub fn by(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
        }
    }

    /// Adds a lower-precedence sort key.
    #[must_use]
    pub fn then_by(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Returns the sort keys in precedence order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if no sort key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compares two entities key by key.
    #[must_use]
    pub fn compare<E: Entity>(&self, a: &E, b: &E) -> Ordering {
        self.fields
            .iter()
            .map(|field| compare_values(a.field(field).as_ref(), b.field(field).as_ref()))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Sorts entities in place. The sort is stable.
    pub fn sort<E: Entity>(&self, entities: &mut [E]) {
        if self.fields.is_empty() {
            return;
        }
        entities.sort_by(|a, b| self.compare(a, b));
    }
}

impl<S: Into<String>> FromIterator<S> for OrderBy {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Equality with numeric normalisation, so `1` equals `1.0`.
///
/// Two integers compare exactly, even beyond the range an `f64` represents
/// without loss.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Ordering::Equal,
        _ => a == b,
    }
}

/// Integers are ordered exactly; `f64` is used only when a float is involved.
fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x.cmp(&y);
    }
    if !x.is_f64() && !y.is_f64() {
        // One side is negative, the other above i64::MAX.
        return if x.as_i64().is_some() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let x = x.as_f64().unwrap_or(f64::NAN);
    let y = y.as_f64().unwrap_or(f64::NAN);
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Total order over optional JSON values.
///
/// Missing and null sort first, then booleans, numbers, strings, arrays and
/// objects. Arrays compare element-wise; objects compare by their serialized
/// text.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => compare_numbers(x, y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Array(x)), Some(Value::Array(y))) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(Some(l), Some(r)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Some(x @ Value::Object(_)), Some(y @ Value::Object(_))) => x.to_string().cmp(&y.to_string()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
