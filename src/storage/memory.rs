//! In-process cafe store.
//!
//! Mirrors the Postgres backend's contract (serial ids, unique names, lowest-id location
//! match) so the service can run and be tested without a database.

use crate::domain::{Cafe, NewCafe};
use crate::storage::{CafeStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    // Ids are never reused, like a SERIAL column.
    last_id: i32,
    rows: BTreeMap<i32, Cafe>,
}

#[derive(Default)]
pub struct MemoryCafeStore {
    table: RwLock<Table>,
}

impl MemoryCafeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CafeStore for MemoryCafeStore {
    async fn list_all(&self) -> StoreResult<Vec<Cafe>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Cafe>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_location(&self, location: &str) -> StoreResult<Option<Cafe>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|cafe| cafe.location == location)
            .cloned())
    }

    async fn insert(&self, cafe: NewCafe) -> StoreResult<Cafe> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|existing| existing.name == cafe.name) {
            return Err(StoreError::ConstraintViolation(format!(
                "a cafe named '{}' already exists",
                cafe.name
            )));
        }

        table.last_id += 1;
        let row = cafe.into_cafe(table.last_id);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_price(&self, id: i32, coffee_price: Option<String>) -> StoreResult<()> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        row.coffee_price = coffee_price;
        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn count(&self) -> StoreResult<i64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
