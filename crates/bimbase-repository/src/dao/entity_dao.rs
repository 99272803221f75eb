//! `Dao<E>` trait: storage-agnostic access surface for one entity type.
//!
//! Upper layers hold an `Arc<dyn Dao<E>>` and never learn which storage
//! engine sits behind it.
//!
//! Failures are reported through the closed taxonomy of
//! [`BimError`](bimbase_core::BimError): `NotFound`, `ConstraintViolation`,
//! `UnsupportedOperation` and `StorageUnavailable`. Absence is not a failure:
//! a point lookup that finds nothing returns `None`, a filter that matches
//! nothing returns an empty vector or zero.
//!
//! Writes are visible to subsequent reads through the same instance, and
//! each call is atomic with respect to its own effect.

use async_trait::async_trait;
use bimbase_core::{AggregateResult, BimResult, Entity, Filter, GroupExpression, Interface, OrderBy};

/// Generic data access object.
///
/// Entities are passed by reference and never modified; write operations
/// return the persisted form as a new value.
#[async_trait]
pub trait Dao<E: Entity>: Interface + Send + Sync {
    /// Returns every entity matching `filter`, sorted by `order_by`.
    ///
    /// An empty filter matches everything; an empty ordering leaves the
    /// order to the implementation.
    async fn select(&self, filter: &Filter, order_by: &OrderBy) -> BimResult<Vec<E>>;

    /// Evaluates a grouping query over the entities matching `filter`.
    ///
    /// Fails with `UnsupportedOperation` when the implementation cannot
    /// evaluate `expression`.
    async fn select_group(
        &self,
        expression: &GroupExpression,
        filter: &Filter,
    ) -> BimResult<AggregateResult>;

    /// Looks up one entity. `None` means not found.
    async fn select_by_id(&self, id: &E::Id) -> BimResult<Option<E>>;

    /// Persists a new entity and returns its persisted form, including any
    /// generated identifier.
    async fn insert(&self, entity: &E) -> BimResult<E>;

    /// Persists changes to the existing entity carrying the same identifier.
    ///
    /// Fails with `NotFound` when the identifier is unset or unknown.
    async fn update(&self, entity: &E) -> BimResult<E>;

    /// Calls [`Dao::update`] when the entity carries an identifier
    /// ([`Entity::id`] is `Some`), otherwise [`Dao::insert`].
    ///
    /// The branch depends on identifier presence alone; no lookup is made.
    async fn insert_or_update(&self, entity: &E) -> BimResult<E> {
        if entity.has_id() {
            self.update(entity).await
        } else {
            self.insert(entity).await
        }
    }

    /// Removes one entity. Returns `false` if nothing was removed.
    async fn delete(&self, id: &E::Id) -> BimResult<bool>;

    /// Removes every entity matching `filter` and returns how many were removed.
    async fn delete_where(&self, filter: &Filter) -> BimResult<u64>;
}
