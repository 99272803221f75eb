//! Core traits describing persisted entities.

use crate::BimResult;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An opaque entity identifier.
///
/// Implementations choose the representation (UUID, number, string). A
/// generated value must never collide with one handed out before, so callers
/// may assume an identifier is never reused after deletion.
pub trait Identifier: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static {
    /// Generates a fresh identifier.
    fn generate() -> Self;
}

/// A persisted record identified by an opaque [`Identifier`].
///
/// The data access layer treats entities as payloads: it reads field values
/// through [`Entity::field`] to evaluate filters and orderings and otherwise
/// leaves their content alone.
///
/// # Identifier presence
///
/// An identifier is populated if and only if [`Entity::id`] returns `Some`.
/// `insert_or_update` dispatches on exactly this. Identifier types must not
/// offer a default value that could be confused with "unset".
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// Resource name used in error messages, logs and storage bindings.
    const RESOURCE: &'static str;

    /// Identifier type.
    type Id: Identifier;

    /// Returns the identifier, or `None` when it has not been assigned yet.
    fn id(&self) -> Option<&Self::Id>;

    /// Returns this entity carrying the given identifier.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;

    /// Returns the value of a named field.
    ///
    /// The default implementation reads the serialized form of the entity.
    /// Dotted names (`site.city`) address nested objects. A field that does
    /// not exist yields `None`.
    fn field(&self, name: &str) -> Option<Value> {
        let value = serde_json::to_value(self).ok()?;
        let pointer: String = name
            .split('.')
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();
        value.pointer(&pointer).cloned()
    }

    /// Checks required-field and type rules before the entity is persisted.
    fn validate_entity(&self) -> BimResult<()> {
        Ok(())
    }

    /// Returns `true` if the entity carries an identifier.
    fn has_id(&self) -> bool {
        self.id().is_some()
    }
}
