//! Proximity-gated order placement.

use marketplace_core::{StoreId, within_range};
use tracing::{info, warn};

use super::Session;
use crate::db::Marketplace;
use crate::error::{Result, WorkflowError};
use crate::models::{NewOrder, Order};

/// Ordering service.
pub struct OrderingService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> OrderingService<'a> {
    /// Create a new ordering service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// Place an order if the store is within delivery range.
    ///
    /// The order number is allocated by the persistence layer as one more
    /// than the current maximum. The product is not checked against the
    /// store's stock, and any unit count is accepted.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the store or the user's location
    /// does not resolve.
    /// Returns `WorkflowError::OutOfRange` if the store is too far away; no
    /// order is recorded.
    pub async fn place_order(
        &self,
        session: &Session,
        store_id: StoreId,
        product_name: &str,
        units: i32,
    ) -> Result<Order> {
        let store_location = self
            .db
            .get_store(store_id)
            .await?
            .and_then(|s| s.location)
            .ok_or(WorkflowError::NotFound("store"))?;

        let user_location = self
            .db
            .get_user(session.user_id)
            .await?
            .and_then(|u| u.location)
            .ok_or(WorkflowError::NotFound("user location"))?;

        let distance = user_location.distance_to(&store_location);
        if !within_range(distance) {
            warn!(
                user_id = %session.user_id,
                store_id = %store_id,
                distance,
                "Order rejected, store out of range"
            );
            return Err(WorkflowError::OutOfRange { distance });
        }

        let order = self
            .db
            .place_order(&NewOrder {
                customer_id: session.user_id,
                store_id,
                product_name: product_name.to_owned(),
                units,
            })
            .await?;

        info!(
            order_number = %order.number,
            user_id = %session.user_id,
            store_id = %store_id,
            units,
            "Order placed"
        );
        Ok(order)
    }
}
