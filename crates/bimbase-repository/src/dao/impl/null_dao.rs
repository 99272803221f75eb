//! `NullDao`: DAO bound when an entity's storage feature is disabled.

use crate::dao::Dao;
use async_trait::async_trait;
use bimbase_core::{AggregateResult, BimResult, Entity, Filter, GroupExpression, OrderBy};
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// Null-object DAO with no backing store.
///
/// Reads return nothing, writes echo their input unchanged and deletes
/// report that nothing was removed. It holds no state and never returns an
/// error, so components depending on a `Dao<E>` can be wired unchanged when
/// storage for `E` is switched off.
pub struct NullDao<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> NullDao<E> {
    /// Creates a null DAO.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for NullDao<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for NullDao<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Copy for NullDao<E> {}

impl<E: Entity> fmt::Debug for NullDao<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullDao")
            .field("resource", &E::RESOURCE)
            .finish()
    }
}

#[async_trait]
impl<E: Entity> Dao<E> for NullDao<E> {
    async fn select(&self, _filter: &Filter, _order_by: &OrderBy) -> BimResult<Vec<E>> {
        trace!(resource = E::RESOURCE, "NullDao: select");
        Ok(Vec::new())
    }

    async fn select_group(
        &self,
        expression: &GroupExpression,
        _filter: &Filter,
    ) -> BimResult<AggregateResult> {
        trace!(resource = E::RESOURCE, %expression, "NullDao: select_group");
        Ok(AggregateResult::None)
    }

    async fn select_by_id(&self, id: &E::Id) -> BimResult<Option<E>> {
        trace!(resource = E::RESOURCE, %id, "NullDao: select_by_id");
        Ok(None)
    }

    async fn insert(&self, entity: &E) -> BimResult<E> {
        trace!(resource = E::RESOURCE, "NullDao: insert");
        Ok(entity.clone())
    }

    async fn update(&self, entity: &E) -> BimResult<E> {
        trace!(resource = E::RESOURCE, "NullDao: update");
        Ok(entity.clone())
    }

    async fn insert_or_update(&self, entity: &E) -> BimResult<E> {
        trace!(resource = E::RESOURCE, "NullDao: insert_or_update");
        Ok(entity.clone())
    }

    async fn delete(&self, id: &E::Id) -> BimResult<bool> {
        trace!(resource = E::RESOURCE, %id, "NullDao: delete");
        Ok(false)
    }

    async fn delete_where(&self, _filter: &Filter) -> BimResult<u64> {
        trace!(resource = E::RESOURCE, "NullDao: delete_where");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bimbase_core::{Project, ProjectId};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reads_are_empty() {
        let dao = NullDao::<Project>::new();
        assert!(dao.select(&Filter::new(), &OrderBy::none()).await.unwrap().is_empty());
        assert!(dao.select_by_id(&ProjectId::new()).await.unwrap().is_none());
        assert!(dao
            .select_group(&GroupExpression::count(), &Filter::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_writes_echo_input() {
        let dao = NullDao::<Project>::new();
        let project = Project::new("Test project", "alice");
        assert_eq!(dao.insert(&project).await.unwrap(), project);
        assert_eq!(dao.update(&project).await.unwrap(), project);
        assert_eq!(dao.insert_or_update(&project).await.unwrap(), project);
    }

    #[tokio::test]
    async fn test_update_does_not_check_existence() {
        let dao = NullDao::<Project>::new();
        let project = Project::new("Ghost", "alice").with_id(ProjectId::new());
        assert_eq!(dao.update(&project).await.unwrap(), project);
    }

    #[tokio::test]
    async fn test_deletes_remove_nothing() {
        let dao = NullDao::<Project>::new();
        assert!(!dao.delete(&ProjectId::new()).await.unwrap());
        assert_eq!(dao.delete_where(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let dao: Arc<dyn Dao<Project>> = Arc::new(NullDao::<Project>::new());
        assert!(dao.select(&Filter::new(), &OrderBy::none()).await.unwrap().is_empty());
    }

    #[test]
    fn test_is_zero_sized() {
        assert_eq!(std::mem::size_of::<NullDao<Project>>(), 0);
    }
}
