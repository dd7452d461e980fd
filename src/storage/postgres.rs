//! Cafe store backed by PostgreSQL.

use crate::domain::cafe::CREATE_TABLE_SQL;
use crate::domain::{Cafe, NewCafe};
use crate::storage::{CafeStore, StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SELECT_CAFE: &str = "SELECT id, name, map_url, img_url, location, seats, has_toilet, \
     has_wifi, has_sockets, can_take_calls, coffee_price FROM cafe";

// SQLSTATEs not covered by `DatabaseError::kind`.
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Connections are checked out of the pool for the duration of a single call and returned
/// on every path, including errors.
#[derive(Clone)]
pub struct PgCafeStore {
    pool: PgPool,
}

impl PgCafeStore {
    /// Connects to `database_url` and makes sure the `cafe` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_insert_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::ConstraintViolation(format!(
                "a cafe named '{}' already exists",
                name
            ));
        }
        if db_err.code().as_deref() == Some(NOT_NULL_VIOLATION) {
            return StoreError::ConstraintViolation(db_err.message().to_string());
        }
    }
    map_value_error(err)
}

fn map_value_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return StoreError::InvalidValue(db_err.message().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CafeStore for PgCafeStore {
    async fn list_all(&self) -> StoreResult<Vec<Cafe>> {
        let sql = format!("{} ORDER BY id", SELECT_CAFE);
        let cafes = sqlx::query_as::<_, Cafe>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(cafes)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Cafe>> {
        let sql = format!("{} WHERE id = $1", SELECT_CAFE);
        let cafe = sqlx::query_as::<_, Cafe>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cafe)
    }

    async fn find_by_location(&self, location: &str) -> StoreResult<Option<Cafe>> {
        let sql = format!("{} WHERE location = $1 ORDER BY id LIMIT 1", SELECT_CAFE);
        let cafe = sqlx::query_as::<_, Cafe>(&sql)
            .bind(location)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cafe)
    }

    async fn insert(&self, cafe: NewCafe) -> StoreResult<Cafe> {
        let sql = "INSERT INTO cafe (name, map_url, img_url, location, seats, has_toilet, \
             has_wifi, has_sockets, can_take_calls, coffee_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING id, name, map_url, img_url, location, seats, has_toilet, has_wifi, \
             has_sockets, can_take_calls, coffee_price";

        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query_as::<_, Cafe>(sql)
            .bind(&cafe.name)
            .bind(&cafe.map_url)
            .bind(&cafe.img_url)
            .bind(&cafe.location)
            .bind(&cafe.seats)
            .bind(cafe.has_toilet)
            .bind(cafe.has_wifi)
            .bind(cafe.has_sockets)
            .bind(cafe.can_take_calls)
            .bind(&cafe.coffee_price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, &cafe.name))?;
        tx.commit().await?;

        tracing::debug!(id = inserted.id, name = %inserted.name, "inserted cafe");
        Ok(inserted)
    }

    async fn update_price(&self, id: i32, coffee_price: Option<String>) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE cafe SET coffee_price = $1 WHERE id = $2")
            .bind(&coffee_price)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_value_error)?;
        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(StoreError::NotFound(id));
        }
        tx.commit().await?;

        tracing::debug!(id, ?coffee_price, "updated coffee price");
        Ok(())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM cafe WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.commit().await?;

        tracing::debug!(id, "deleted cafe");
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cafe")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
