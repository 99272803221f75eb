//! `InMemoryDao`: process-local reference backend.

use crate::dao::Dao;
use async_trait::async_trait;
use bimbase_core::{
    compare_values, values_equal, AggregateGroup, AggregateResult, BimError, BimResult, Entity,
    Filter, GroupExpression, Identifier, OrderBy,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

struct Row<E> {
    seq: u64,
    entity: E,
}

struct Table<E: Entity> {
    next_seq: u64,
    rows: HashMap<E::Id, Row<E>>,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            next_seq: 0,
            rows: HashMap::new(),
        }
    }

    /// Matching entities in insertion order.
    fn matching(&self, filter: &Filter) -> Vec<&Row<E>> {
        let mut rows: Vec<&Row<E>> = self
            .rows
            .values()
            .filter(|row| filter.matches(&row.entity))
            .collect();
        rows.sort_by_key(|row| row.seq);
        rows
    }
}

/// In-memory DAO keeping every entity behind a single lock.
///
/// Unordered selects return entities in insertion order. Updates keep an
/// entity's original position.
///
/// Supported grouping expressions:
/// - `count`
/// - `count by <field>` (buckets ordered by key)
pub struct InMemoryDao<E: Entity> {
    table: RwLock<Table<E>>,
    unique_fields: Vec<String>,
    available: AtomicBool,
}

impl<E: Entity> InMemoryDao<E> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
            unique_fields: Vec::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Rejects writes that would give two entities the same value for `fields`.
    ///
    /// Each field is checked on its own; this is not a composite key.
    #[must_use]
    pub fn with_unique_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Simulates the store becoming (un)reachable.
    ///
    /// While unavailable every operation fails with `StorageUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        if available {
            debug!(resource = E::RESOURCE, "InMemoryDao: storage available");
        } else {
            warn!(resource = E::RESOURCE, "InMemoryDao: storage marked unavailable");
        }
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> BimResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BimError::unavailable(format!(
                "in-memory store for {} is offline",
                E::RESOURCE
            )))
        }
    }

    fn check_unique(&self, table: &Table<E>, entity: &E, own_id: &E::Id) -> BimResult<()> {
        for field in &self.unique_fields {
            let Some(value) = entity.field(field).filter(|v| !v.is_null()) else {
                continue;
            };
            let clash = table.rows.iter().any(|(id, row)| {
                id != own_id
                    && row
                        .entity
                        .field(field)
                        .is_some_and(|other| values_equal(&other, &value))
            });
            if clash {
                return Err(BimError::constraint(format!(
                    "{} with {} = {} already exists",
                    E::RESOURCE,
                    field,
                    value
                )));
            }
        }
        Ok(())
    }

    fn evaluate_group(expression: &GroupExpression, rows: &[&Row<E>]) -> BimResult<AggregateResult> {
        let text = expression.as_str().trim();

        if text == "count" {
            return Ok(AggregateResult::Count(rows.len() as u64));
        }

        if let Some(field) = text.strip_prefix("count by ").map(str::trim) {
            if !field.is_empty() && !field.contains(char::is_whitespace) {
                return Ok(AggregateResult::Groups(count_by(field, rows)));
            }
        }

        Err(BimError::unsupported(format!(
            "in-memory store cannot evaluate '{}'",
            expression
        )))
    }
}

fn count_by<E: Entity>(field: &str, rows: &[&Row<E>]) -> Vec<AggregateGroup> {
    let mut groups: Vec<AggregateGroup> = Vec::new();
    for row in rows {
        let key = row.entity.field(field).unwrap_or(Value::Null);
        match groups.iter_mut().find(|g| values_equal(&g.key, &key)) {
            Some(group) => group.count += 1,
            None => groups.push(AggregateGroup { key, count: 1 }),
        }
    }
    groups.sort_by(|a, b| compare_values(Some(&a.key), Some(&b.key)));
    groups
}

impl<E: Entity> Default for InMemoryDao<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for InMemoryDao<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryDao")
            .field("resource", &E::RESOURCE)
            .field("len", &self.len())
            .field("unique_fields", &self.unique_fields)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<E: Entity> Dao<E> for InMemoryDao<E> {
    async fn select(&self, filter: &Filter, order_by: &OrderBy) -> BimResult<Vec<E>> {
        self.ensure_available()?;
        let mut entities: Vec<E> = {
            let table = self.table.read();
            table
                .matching(filter)
                .into_iter()
                .map(|row| row.entity.clone())
                .collect()
        };
        order_by.sort(&mut entities);
        debug!(resource = E::RESOURCE, matched = entities.len(), "InMemoryDao: select");
        Ok(entities)
    }

    async fn select_group(
        &self,
        expression: &GroupExpression,
        filter: &Filter,
    ) -> BimResult<AggregateResult> {
        self.ensure_available()?;
        let table = self.table.read();
        let rows = table.matching(filter);
        debug!(resource = E::RESOURCE, %expression, "InMemoryDao: select_group");
        Self::evaluate_group(expression, &rows)
    }

    async fn select_by_id(&self, id: &E::Id) -> BimResult<Option<E>> {
        self.ensure_available()?;
        debug!(resource = E::RESOURCE, %id, "InMemoryDao: select_by_id");
        Ok(self.table.read().rows.get(id).map(|row| row.entity.clone()))
    }

    async fn insert(&self, entity: &E) -> BimResult<E> {
        self.ensure_available()?;
        entity.validate_entity()?;

        let mut table = self.table.write();
        let id = match entity.id() {
            Some(id) if table.rows.contains_key(id) => {
                return Err(BimError::constraint(format!(
                    "{} with id {} already exists",
                    E::RESOURCE,
                    id
                )));
            }
            Some(id) => id.clone(),
            None => loop {
                let candidate = E::Id::generate();
                if !table.rows.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        self.check_unique(&table, entity, &id)?;

        let persisted = entity.clone().with_id(id.clone());
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(
            id.clone(),
            Row {
                seq,
                entity: persisted.clone(),
            },
        );

        debug!(resource = E::RESOURCE, %id, "InMemoryDao: inserted");
        Ok(persisted)
    }

    async fn update(&self, entity: &E) -> BimResult<E> {
        self.ensure_available()?;
        let id = entity
            .id()
            .ok_or_else(|| BimError::not_found(E::RESOURCE, "<unset>"))?;
        entity.validate_entity()?;

        let mut table = self.table.write();
        if !table.rows.contains_key(id) {
            return Err(BimError::not_found(E::RESOURCE, id));
        }
        self.check_unique(&table, entity, id)?;

        if let Some(row) = table.rows.get_mut(id) {
            row.entity = entity.clone();
        }

        debug!(resource = E::RESOURCE, %id, "InMemoryDao: updated");
        Ok(entity.clone())
    }

    async fn delete(&self, id: &E::Id) -> BimResult<bool> {
        self.ensure_available()?;
        let removed = self.table.write().rows.remove(id).is_some();
        debug!(resource = E::RESOURCE, %id, removed, "InMemoryDao: delete");
        Ok(removed)
    }

    async fn delete_where(&self, filter: &Filter) -> BimResult<u64> {
        self.ensure_available()?;
        let mut table = self.table.write();
        let before = table.rows.len();
        table.rows.retain(|_, row| !filter.matches(&row.entity));
        let removed = (before - table.rows.len()) as u64;
        debug!(resource = E::RESOURCE, removed, "InMemoryDao: delete_where");
        Ok(removed)
    }
}
