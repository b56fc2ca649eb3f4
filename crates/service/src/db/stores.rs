//! Store repository for database operations.

use sqlx::PgPool;

use marketplace_core::{StoreId, UserId};

use super::{RepositoryError, location};
use crate::models::Store;

/// Internal row type for `Store` queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    store_id: i32,
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    manager_id: Option<i32>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.store_id),
            name: row.name,
            location: location(row.latitude, row.longitude),
            manager_id: row.manager_id.map(UserId::new),
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT storeID AS store_id,
                   TRIM(name) AS name,
                   latitude::float8 AS latitude,
                   longitude::float8 AS longitude,
                   managerID AS manager_id
            FROM Store
            ORDER BY storeID
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT storeID AS store_id,
                   TRIM(name) AS name,
                   latitude::float8 AS latitude,
                   longitude::float8 AS longitude,
                   managerID AS manager_id
            FROM Store
            WHERE storeID = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Store::from))
    }
}
