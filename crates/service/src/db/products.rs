//! Product repository for database operations.
//!
//! Products are keyed by `(storeID, productName)`. Every write is scoped to
//! that pair.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use marketplace_core::{Price, ProductFieldUpdate, StoreId, UserId};

use super::RepositoryError;
use crate::models::{Product, ProductChange};

/// Internal row type for `Product` queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    store_id: i32,
    product_name: String,
    units: i32,
    price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            store_id: StoreId::new(row.store_id),
            name: row.product_name,
            units: row.units,
            price: Price::new(row.price),
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the products of a store. The store is not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT storeID AS store_id,
                   TRIM(productName) AS product_name,
                   numberOfUnits AS units,
                   pricePerUnit::numeric AS price
            FROM Product
            WHERE storeID = $1
            ORDER BY productName
            ",
        )
        .bind(store_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by store and name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        fetch_product(&mut *conn, store_id, name).await
    }

    /// Overwrite units and price, and append a `ProductUpdates` entry.
    ///
    /// Both statements run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_stock_and_price(
        &self,
        manager_id: UserId,
        change: &ProductChange,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE Product
            SET numberOfUnits = $1, pricePerUnit = $2
            WHERE storeID = $3 AND productName = $4
            RETURNING storeID AS store_id,
                      TRIM(productName) AS product_name,
                      numberOfUnits AS units,
                      pricePerUnit::numeric AS price
            ",
        )
        .bind(change.units)
        .bind(change.price.amount())
        .bind(change.store_id.as_i32())
        .bind(&change.product_name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query(
            r"
            INSERT INTO ProductUpdates (managerID, storeID, productName, updatedOn)
            VALUES ($1, $2, $3, NOW())
            ",
        )
        .bind(manager_id.as_i32())
        .bind(change.store_id.as_i32())
        .bind(&change.product_name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Product::from(row))
    }
}

/// Get a product on an existing connection or transaction.
pub(crate) async fn fetch_product(
    conn: &mut PgConnection,
    store_id: StoreId,
    name: &str,
) -> Result<Option<Product>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r"
        SELECT storeID AS store_id,
               TRIM(productName) AS product_name,
               numberOfUnits AS units,
               pricePerUnit::numeric AS price
        FROM Product
        WHERE storeID = $1 AND productName = $2
        ",
    )
    .bind(store_id.as_i32())
    .bind(name)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(Product::from))
}

/// Overwrite one column of a product. Returns the number of rows changed.
pub(crate) async fn update_field(
    conn: &mut PgConnection,
    store_id: StoreId,
    name: &str,
    update: &ProductFieldUpdate,
) -> Result<u64, RepositoryError> {
    let query = match update {
        ProductFieldUpdate::NumberOfUnits(units) => sqlx::query(
            "UPDATE Product SET numberOfUnits = $1 WHERE storeID = $2 AND productName = $3",
        )
        .bind(*units),
        ProductFieldUpdate::PricePerUnit(price) => sqlx::query(
            "UPDATE Product SET pricePerUnit = $1 WHERE storeID = $2 AND productName = $3",
        )
        .bind(price.amount()),
    };

    let result = query
        .bind(store_id.as_i32())
        .bind(name)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
