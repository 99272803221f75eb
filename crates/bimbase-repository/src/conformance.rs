//! Contract checks runnable against any [`Dao`] implementation.
//!
//! Storage engine crates call these from their integration tests to show
//! they honour the DAO contract. Each check leaves the store as it found it
//! when it passes.

use crate::dao::Dao;
use bimbase_core::{BimError, Entity, Filter, GroupExpression, OrderBy};
use serde::Serialize;
use std::fmt::Debug;
use thiserror::Error;

/// Outcome of a failed conformance check.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// The DAO behaved differently from what the contract requires.
    #[error("{check}: {detail}")]
    Violation { check: &'static str, detail: String },

    /// The DAO returned an error where the contract requires success.
    #[error(transparent)]
    Dao(#[from] BimError),
}

/// Result of a conformance check.
pub type ConformanceResult = Result<(), ConformanceError>;

fn violation(check: &'static str, detail: impl Into<String>) -> ConformanceError {
    ConformanceError::Violation {
        check,
        detail: detail.into(),
    }
}

fn ensure(condition: bool, check: &'static str, detail: impl FnOnce() -> String) -> ConformanceResult {
    if condition {
        Ok(())
    } else {
        Err(violation(check, detail()))
    }
}

/// Insert, look up, delete, look up again.
///
/// `sample` should not carry an identifier.
pub async fn check_round_trip<E>(dao: &dyn Dao<E>, sample: &E) -> ConformanceResult
where
    E: Entity + PartialEq + Debug,
{
    const CHECK: &str = "round_trip";

    let inserted = dao.insert(sample).await?;
    let id = inserted
        .id()
        .cloned()
        .ok_or_else(|| violation(CHECK, "insert returned an entity without an identifier"))?;

    let found = dao.select_by_id(&id).await?;
    ensure(found.as_ref() == Some(&inserted), CHECK, || {
        format!("select_by_id({}) returned {:?}, expected {:?}", id, found, inserted)
    })?;

    ensure(dao.delete(&id).await?, CHECK, || {
        format!("delete({}) reported nothing removed", id)
    })?;

    let after = dao.select_by_id(&id).await?;
    ensure(after.is_none(), CHECK, || {
        format!("select_by_id({}) still returned {:?} after delete", id, after)
    })
}

/// Every entity returned for `filter` satisfies it, in `order_by` order.
pub async fn check_filter_soundness<E>(
    dao: &dyn Dao<E>,
    filter: &Filter,
    order_by: &OrderBy,
) -> ConformanceResult
where
    E: Entity + Debug,
{
    const CHECK: &str = "filter_soundness";

    let selected = dao.select(filter, order_by).await?;
    if let Some(stray) = selected.iter().find(|e| !filter.matches(*e)) {
        return Err(violation(CHECK, format!("{:?} does not match {:?}", stray, filter)));
    }

    let ordered = selected
        .windows(2)
        .all(|pair| order_by.compare(&pair[0], &pair[1]) != std::cmp::Ordering::Greater);
    ensure(ordered, CHECK, || format!("result is not sorted by {:?}", order_by.fields()))
}

/// `insert_or_update` inserts when the identifier is unset and updates when
/// it is set.
///
/// `fresh` should not carry an identifier; `modify` must change a field
/// without touching the identifier.
pub async fn check_upsert_dispatch<E, F>(dao: &dyn Dao<E>, fresh: &E, modify: F) -> ConformanceResult
where
    E: Entity + PartialEq + Debug,
    F: FnOnce(&mut E) + Send,
{
    const CHECK: &str = "upsert_dispatch";

    ensure(!fresh.has_id(), CHECK, || "sample already carries an identifier".to_string())?;

    let inserted = dao.insert_or_update(fresh).await?;
    let id = inserted
        .id()
        .cloned()
        .ok_or_else(|| violation(CHECK, "insert branch returned no identifier"))?;

    let mut changed = inserted.clone();
    modify(&mut changed);
    let updated = dao.insert_or_update(&changed).await?;
    ensure(updated.id() == Some(&id), CHECK, || {
        format!("update branch changed identifier {} to {:?}", id, updated.id())
    })?;

    let stored = dao.select_by_id(&id).await?;
    ensure(stored.as_ref() == Some(&updated), CHECK, || {
        format!("stored {:?}, expected {:?}", stored, updated)
    })?;

    let all = dao.select(&Filter::new(), &OrderBy::none()).await?;
    let copies = all.iter().filter(|e| e.id() == Some(&id)).count();
    ensure(copies == 1, CHECK, || format!("found {} entities with id {}", copies, id))?;

    dao.delete(&id).await?;
    Ok(())
}

/// Deleting an identifier that was never inserted returns `false`, and a
/// filter on that identifier removes nothing.
pub async fn check_delete_absent<E>(dao: &dyn Dao<E>, absent: &E::Id) -> ConformanceResult
where
    E: Entity,
    E::Id: Serialize,
{
    const CHECK: &str = "delete_absent";

    ensure(!dao.delete(absent).await?, CHECK, || {
        format!("delete({}) reported a removal", absent)
    })?;

    let id = serde_json::to_value(absent).map_err(BimError::from)?;
    let filter = Filter::new().eq("id", id);
    let removed = dao.delete_where(&filter).await?;
    ensure(removed == 0, CHECK, || format!("delete_where removed {} entities", removed))
}

/// Null-object behaviour: empty reads, echoed writes, no deletions, no errors.
pub async fn check_null_object<E>(dao: &dyn Dao<E>, sample: &E, probe: &E::Id) -> ConformanceResult
where
    E: Entity + PartialEq + Debug,
{
    const CHECK: &str = "null_object";

    let selected = dao.select(&Filter::new(), &OrderBy::none()).await?;
    ensure(selected.is_empty(), CHECK, || format!("select returned {} entities", selected.len()))?;

    let grouped = dao.select_group(&GroupExpression::count(), &Filter::new()).await?;
    ensure(grouped.is_none(), CHECK, || format!("select_group returned {:?}", grouped))?;

    let found = dao.select_by_id(probe).await?;
    ensure(found.is_none(), CHECK, || format!("select_by_id returned {:?}", found))?;

    for (operation, echoed) in [
        ("insert", dao.insert(sample).await?),
        ("update", dao.update(sample).await?),
        ("insert_or_update", dao.insert_or_update(sample).await?),
    ] {
        ensure(&echoed == sample, CHECK, || {
            format!("{} returned {:?}, expected the input unchanged", operation, echoed)
        })?;
    }

    ensure(!dao.delete(probe).await?, CHECK, || "delete reported a removal".to_string())?;

    let removed = dao.delete_where(&Filter::new()).await?;
    ensure(removed == 0, CHECK, || format!("delete_where removed {}", removed))
}
