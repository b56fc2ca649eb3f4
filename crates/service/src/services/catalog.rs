//! Store discovery and product listings.

use marketplace_core::{StoreId, within_range};
use tracing::debug;

use super::Session;
use crate::db::Marketplace;
use crate::error::{Result, WorkflowError};
use crate::models::{NearbyStore, Product};

/// Catalog service.
pub struct CatalogService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// Stores within delivery range of the acting user, in store ID order.
    ///
    /// A user without stored coordinates sees no stores. Stores without
    /// coordinates are never in range.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the session's user no longer
    /// exists.
    pub async fn nearby_stores(&self, session: &Session) -> Result<Vec<NearbyStore>> {
        let user = self
            .db
            .get_user(session.user_id)
            .await?
            .ok_or(WorkflowError::NotFound("user"))?;

        let Some(origin) = user.location else {
            debug!(user_id = %user.id, "User has no location, no stores in range");
            return Ok(Vec::new());
        };

        let stores = self.db.list_stores().await?;
        Ok(stores
            .into_iter()
            .filter_map(|store| {
                let distance = origin.distance_to(&store.location?);
                within_range(distance).then_some(NearbyStore {
                    store_id: store.id,
                    name: store.name,
                    distance,
                })
            })
            .collect())
    }

    /// Every product stocked by a store.
    ///
    /// An unknown store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the query fails.
    pub async fn products(&self, store_id: StoreId) -> Result<Vec<Product>> {
        Ok(self.db.list_products(store_id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::fixtures;

    #[tokio::test]
    async fn test_nearby_stores_filters_by_threshold() {
        let w = fixtures::world();
        let stores = CatalogService::new(&w.db)
            .nearby_stores(&w.customer)
            .await
            .unwrap();

        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].store_id, w.near_store);
        assert!((stores[0].distance - 20.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_nearby_stores_empty_without_location() {
        let w = fixtures::world();
        let stores = CatalogService::new(&w.db)
            .nearby_stores(&w.nomad)
            .await
            .unwrap();
        assert!(stores.is_empty());
    }

    #[tokio::test]
    async fn test_nearby_stores_includes_boundary() {
        let mut w = fixtures::world();
        let edge = w.db.add_store(
            "Edge",
            Some(marketplace_core::Coordinates::new(0.0, 30.0)),
            None,
        );
        let stores = CatalogService::new(&w.db)
            .nearby_stores(&w.customer)
            .await
            .unwrap();
        assert!(stores.iter().any(|s| s.store_id == edge));
    }

    #[tokio::test]
    async fn test_products_lists_store_rows_only() {
        let w = fixtures::world();
        let products = CatalogService::new(&w.db)
            .products(w.near_store)
            .await
            .unwrap();

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Gadget", "Widget"]);
        assert!(products.iter().all(|p| p.store_id == w.near_store));
    }

    #[tokio::test]
    async fn test_products_unknown_store_is_empty() {
        let w = fixtures::world();
        let products = CatalogService::new(&w.db)
            .products(StoreId::new(404))
            .await
            .unwrap();
        assert!(products.is_empty());
    }
}
