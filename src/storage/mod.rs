//! Persistence for cafe rows.
//!
//! Handlers never talk to a database directly: they receive an `Arc<dyn CafeStore>` and
//! the concrete backend is picked at startup.

use crate::domain::{Cafe, NewCafe};
use crate::infra::config::{Config, StoreBackend};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCafeStore;
pub use postgres::PgCafeStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cafe {0} not found")]
    NotFound(i32),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Contract every cafe backend fulfils.
///
/// Mutations are committed before the call returns.
#[async_trait]
pub trait CafeStore: Send + Sync {
    /// Every row, ordered by id.
    async fn list_all(&self) -> StoreResult<Vec<Cafe>>;

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Cafe>>;

    /// Exact, case-sensitive location match. When several rows share the location the
    /// one with the lowest id wins.
    async fn find_by_location(&self, location: &str) -> StoreResult<Option<Cafe>>;

    /// Inserts a new row and returns it with its assigned id.
    ///
    /// Fails with `ConstraintViolation` when the name is already taken.
    async fn insert(&self, cafe: NewCafe) -> StoreResult<Cafe>;

    /// Replaces `coffee_price` on a single row (`None` clears it).
    async fn update_price(&self, id: i32, coffee_price: Option<String>) -> StoreResult<()>;

    async fn delete(&self, id: i32) -> StoreResult<()>;

    /// Number of stored rows.
    async fn count(&self) -> StoreResult<i64>;

    /// Cheap liveness check.
    async fn ping(&self) -> StoreResult<()>;
}

/// Opens the backend selected by `CAFE_STORE`.
pub async fn open(config: &Config) -> anyhow::Result<Arc<dyn CafeStore>> {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let store = PgCafeStore::connect(database_url, config.max_connections).await?;
            tracing::info!(max_connections = config.max_connections, "connected to postgres");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory cafe store");
            Ok(Arc::new(MemoryCafeStore::new()))
        }
    }
}
