//! Manager-only stock and price changes.

use marketplace_core::{Price, StoreId, UserRole, WarehouseId};
use tracing::info;

use super::{Session, require_role};
use crate::db::{Marketplace, RepositoryError};
use crate::error::{Result, WorkflowError};
use crate::models::{NewSupplyRequest, Product, ProductChange, SupplyReceipt};

/// Inventory service.
pub struct InventoryService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> InventoryService<'a> {
    /// Create a new inventory service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// Check the acting user is a manager before collecting further input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AuthorizationDenied` for non-managers.
    pub async fn authorize(&self, session: &Session) -> Result<()> {
        require_role(self.db, session, UserRole::Manager).await?;
        Ok(())
    }

    /// Overwrite a product's unit count and price.
    ///
    /// Any manager may update any store's products. The update is logged
    /// to `ProductUpdates` together with the change.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AuthorizationDenied` for non-managers.
    /// Returns `WorkflowError::NotFound` if the store or product does not
    /// exist.
    pub async fn update_product(
        &self,
        session: &Session,
        store_id: StoreId,
        product_name: &str,
        units: i32,
        price: Price,
    ) -> Result<Product> {
        let manager = require_role(self.db, session, UserRole::Manager).await?;

        if self.db.get_store(store_id).await?.is_none() {
            return Err(WorkflowError::NotFound("store"));
        }

        let change = ProductChange {
            store_id,
            product_name: product_name.to_owned(),
            units,
            price,
        };
        let product = self
            .db
            .update_product(manager.id, &change)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => WorkflowError::NotFound("product"),
                other => other.into(),
            })?;

        info!(
            manager_id = %manager.id,
            store_id = %store_id,
            product = product_name,
            units,
            price = %price,
            "Product updated"
        );
        Ok(product)
    }

    /// Record a supply request and take the units off the store's count.
    ///
    /// The store's count is decremented, not incremented, and is unchecked:
    /// it may go negative, and a negative request raises it. A request for a
    /// product the store does not stock is still recorded, with no count
    /// change.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AuthorizationDenied` for non-managers.
    pub async fn place_supply_request(
        &self,
        session: &Session,
        store_id: StoreId,
        product_name: &str,
        units: i32,
        warehouse_id: WarehouseId,
    ) -> Result<SupplyReceipt> {
        let manager = require_role(self.db, session, UserRole::Manager).await?;

        let receipt = self
            .db
            .place_supply_request(&NewSupplyRequest {
                manager_id: manager.id,
                warehouse_id,
                store_id,
                product_name: product_name.to_owned(),
                units,
            })
            .await?;

        info!(
            request_number = %receipt.request.number,
            manager_id = %manager.id,
            warehouse_id = %warehouse_id,
            store_id = %store_id,
            units,
            remaining = ?receipt.remaining_units,
            "Supply request placed"
        );
        Ok(receipt)
    }
}
