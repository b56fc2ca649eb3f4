//! Order repository for database operations.
//!
//! Order numbers are not generated by the schema. They are allocated as
//! `MAX(orderNumber) + 1` inside a transaction that holds a lock on `Orders`
//! which conflicts with itself, so two placements cannot read the same
//! maximum.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use marketplace_core::{OrderNumber, StoreId, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

/// Internal row type for `Orders` queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_number: i32,
    customer_id: i32,
    store_id: i32,
    product_name: String,
    units: i32,
    placed_at: NaiveDateTime,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            number: OrderNumber::new(row.order_number),
            customer_id: UserId::new(row.customer_id),
            store_id: StoreId::new(row.store_id),
            product_name: row.product_name,
            units: row.units,
            placed_at: row.placed_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order under the next order number.
    ///
    /// An empty table yields order number 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lock or insert fails.
    pub async fn place(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE Orders IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO Orders (orderNumber, customerID, storeID, productName, unitsOrdered, orderTime)
            SELECT COALESCE(MAX(orderNumber), 0) + 1, $1, $2, $3, $4, NOW()
            FROM Orders
            RETURNING orderNumber AS order_number,
                      customerID AS customer_id,
                      storeID AS store_id,
                      TRIM(productName) AS product_name,
                      unitsOrdered AS units,
                      orderTime::timestamp AS placed_at
            ",
        )
        .bind(order.customer_id.as_i32())
        .bind(order.store_id.as_i32())
        .bind(&order.product_name)
        .bind(order.units)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Order::from(row))
    }

    /// A customer's most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_customer(
        &self,
        customer_id: UserId,
        limit: i64,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT orderNumber AS order_number,
                   customerID AS customer_id,
                   storeID AS store_id,
                   TRIM(productName) AS product_name,
                   unitsOrdered AS units,
                   orderTime::timestamp AS placed_at
            FROM Orders
            WHERE customerID = $1
            ORDER BY orderTime DESC, orderNumber DESC
            LIMIT $2
            ",
        )
        .bind(customer_id.as_i32())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
