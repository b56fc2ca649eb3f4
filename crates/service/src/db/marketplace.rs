//! The data-access port.
//!
//! Production: [`PgMarketplace`](super::PgMarketplace)
//! Testing: [`MemoryMarketplace`](super::MemoryMarketplace)
//!
//! Each method is one statement or one transaction. Role checks, proximity
//! decisions, and input validation live in the services, not here.

use async_trait::async_trait;

use marketplace_core::{ProductFieldUpdate, StoreId, UserFieldUpdate, UserId};

use super::RepositoryError;
use crate::models::{
    CustomerActivity, NewOrder, NewSupplyRequest, NewUser, Order, Product, ProductChange,
    ProductPopularity, ProductUpdate, Store, SupplyReceipt, User,
};

/// Abstract interface over the marketplace tables.
#[async_trait]
pub trait Marketplace: Send + Sync {
    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// First user whose name and password both match exactly.
    async fn find_user_by_credentials(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError>;

    /// Insert a user and return its assigned ID.
    async fn create_user(&self, user: &NewUser) -> Result<UserId, RepositoryError>;

    /// Get a user by ID.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    // -------------------------------------------------------------------------
    // Stores and products
    // -------------------------------------------------------------------------

    /// All stores, ordered by ID.
    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError>;

    /// Get a store by ID.
    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError>;

    /// All products of a store, ordered by name.
    async fn list_products(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError>;

    /// Get a product by its `(store, name)` key.
    async fn get_product(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Overwrite a product's units and price and log the update.
    ///
    /// Returns `RepositoryError::NotFound` (and writes nothing) if the product
    /// does not exist.
    async fn update_product(
        &self,
        manager_id: UserId,
        change: &ProductChange,
    ) -> Result<Product, RepositoryError>;

    // -------------------------------------------------------------------------
    // Orders and supply
    // -------------------------------------------------------------------------

    /// Insert an order under the next order number.
    ///
    /// Number allocation and insert are atomic with respect to other callers.
    async fn place_order(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// A customer's most recent orders, newest first.
    async fn recent_orders(
        &self,
        customer_id: UserId,
        limit: i64,
    ) -> Result<Vec<Order>, RepositoryError>;

    /// Record a supply request and decrement the product's units by the
    /// requested amount, in one transaction.
    async fn place_supply_request(
        &self,
        request: &NewSupplyRequest,
    ) -> Result<SupplyReceipt, RepositoryError>;

    // -------------------------------------------------------------------------
    // Admin
    // -------------------------------------------------------------------------

    /// Apply one user column update and one product column update together.
    ///
    /// Returns `RepositoryError::NotFound` (and writes nothing) if either
    /// target is missing.
    async fn apply_override(
        &self,
        user_id: UserId,
        user_update: &UserFieldUpdate,
        store_id: StoreId,
        product_name: &str,
        product_update: &ProductFieldUpdate,
    ) -> Result<(User, Product), RepositoryError>;

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Most recent product updates, newest first.
    async fn recent_product_updates(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductUpdate>, RepositoryError>;

    /// Product names by order count, highest first.
    async fn popular_products(&self, limit: i64)
    -> Result<Vec<ProductPopularity>, RepositoryError>;

    /// Customers by order count, highest first.
    async fn popular_customers(&self, limit: i64)
    -> Result<Vec<CustomerActivity>, RepositoryError>;
}
