//! Supply request repository for database operations.

use sqlx::PgPool;

use marketplace_core::{RequestNumber, StoreId, UserId, WarehouseId};

use super::RepositoryError;
use crate::models::{NewSupplyRequest, SupplyReceipt, SupplyRequest};

/// Internal row type for `ProductSupplyRequests` inserts.
#[derive(Debug, sqlx::FromRow)]
struct SupplyRequestRow {
    request_number: i32,
    manager_id: i32,
    warehouse_id: i32,
    store_id: i32,
    product_name: String,
    units: i32,
}

impl From<SupplyRequestRow> for SupplyRequest {
    fn from(row: SupplyRequestRow) -> Self {
        Self {
            number: RequestNumber::new(row.request_number),
            manager_id: UserId::new(row.manager_id),
            warehouse_id: WarehouseId::new(row.warehouse_id),
            store_id: StoreId::new(row.store_id),
            product_name: row.product_name,
            units: row.units,
        }
    }
}

/// Repository for supply request database operations.
pub struct SupplyRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplyRequestRepository<'a> {
    /// Create a new supply request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a supply request and take the requested units off the store's
    /// product count.
    ///
    /// The count may go negative; it is not checked. If the product row does
    /// not exist the request is still recorded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either statement fails; neither
    /// is applied in that case.
    pub async fn create(
        &self,
        request: &NewSupplyRequest,
    ) -> Result<SupplyReceipt, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SupplyRequestRow>(
            r"
            INSERT INTO ProductSupplyRequests
                (managerID, warehouseID, storeID, productName, unitsRequested)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING requestNumber AS request_number,
                      managerID AS manager_id,
                      warehouseID AS warehouse_id,
                      storeID AS store_id,
                      TRIM(productName) AS product_name,
                      unitsRequested AS units
            ",
        )
        .bind(request.manager_id.as_i32())
        .bind(request.warehouse_id.as_i32())
        .bind(request.store_id.as_i32())
        .bind(&request.product_name)
        .bind(request.units)
        .fetch_one(&mut *tx)
        .await?;

        let remaining_units: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE Product
            SET numberOfUnits = numberOfUnits - $1
            WHERE storeID = $2 AND productName = $3
            RETURNING numberOfUnits
            ",
        )
        .bind(request.units)
        .bind(request.store_id.as_i32())
        .bind(&request.product_name)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SupplyReceipt {
            request: SupplyRequest::from(row),
            remaining_units,
        })
    }
}
