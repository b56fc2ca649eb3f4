//! Read-only aggregate queries for the reporting views.
//!
//! Each query sorts descending by its key and takes a caller-supplied limit.
//! Ties are broken deterministically.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use marketplace_core::{StoreId, UpdateNumber, UserId};

use super::RepositoryError;
use crate::models::{CustomerActivity, ProductPopularity, ProductUpdate};

#[derive(Debug, sqlx::FromRow)]
struct ProductUpdateRow {
    update_number: i32,
    manager_id: i32,
    store_id: i32,
    product_name: String,
    updated_on: NaiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductPopularityRow {
    product_name: String,
    order_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerActivityRow {
    customer_id: i32,
    order_count: i64,
}

/// Repository for reporting queries.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent product updates across all stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_product_updates(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductUpdate>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductUpdateRow>(
            r"
            SELECT updateNumber AS update_number,
                   managerID AS manager_id,
                   storeID AS store_id,
                   TRIM(productName) AS product_name,
                   updatedOn::timestamp AS updated_on
            FROM ProductUpdates
            ORDER BY updatedOn DESC, updateNumber DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductUpdate {
                number: UpdateNumber::new(r.update_number),
                manager_id: UserId::new(r.manager_id),
                store_id: StoreId::new(r.store_id),
                product_name: r.product_name,
                updated_on: r.updated_on,
            })
            .collect())
    }

    /// Product names ranked by number of orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn popular_products(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductPopularity>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductPopularityRow>(
            r"
            SELECT TRIM(productName) AS product_name, COUNT(*) AS order_count
            FROM Orders
            GROUP BY productName
            ORDER BY order_count DESC, product_name
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductPopularity {
                product_name: r.product_name,
                order_count: r.order_count,
            })
            .collect())
    }

    /// Customers ranked by number of orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn popular_customers(
        &self,
        limit: i64,
    ) -> Result<Vec<CustomerActivity>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerActivityRow>(
            r"
            SELECT customerID AS customer_id, COUNT(*) AS order_count
            FROM Orders
            GROUP BY customerID
            ORDER BY order_count DESC, customer_id
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerActivity {
                customer_id: UserId::new(r.customer_id),
                order_count: r.order_count,
            })
            .collect())
    }
}
