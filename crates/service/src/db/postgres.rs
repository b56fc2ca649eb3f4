//! `PostgreSQL` adapter for the [`Marketplace`] port.

use async_trait::async_trait;
use sqlx::PgPool;

use marketplace_core::{ProductFieldUpdate, StoreId, UserFieldUpdate, UserId};

use super::orders::OrderRepository;
use super::products::{self, ProductRepository};
use super::reports::ReportRepository;
use super::stores::StoreRepository;
use super::supply_requests::SupplyRequestRepository;
use super::users::{self, UserRepository};
use super::{Marketplace, RepositoryError};
use crate::models::{
    CustomerActivity, NewOrder, NewSupplyRequest, NewUser, Order, Product, ProductChange,
    ProductPopularity, ProductUpdate, Store, SupplyReceipt, User,
};

/// Marketplace backed by a `PostgreSQL` pool.
///
/// Build the pool with [`connect`](super::connect) to get the single-connection
/// configuration.
#[derive(Debug, Clone)]
pub struct PgMarketplace {
    pool: PgPool,
}

impl PgMarketplace {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Marketplace for PgMarketplace {
    async fn find_user_by_credentials(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        UserRepository::new(&self.pool)
            .find_by_credentials(name, password)
            .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        UserRepository::new(&self.pool).create(user).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        UserRepository::new(&self.pool).get_by_id(id).await
    }

    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        StoreRepository::new(&self.pool).list().await
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool).get_by_id(id).await
    }

    async fn list_products(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .list_for_store(store_id)
            .await
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).get(store_id, name).await
    }

    async fn update_product(
        &self,
        manager_id: UserId,
        change: &ProductChange,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(&self.pool)
            .update_stock_and_price(manager_id, change)
            .await
    }

    async fn place_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        OrderRepository::new(&self.pool).place(order).await
    }

    async fn recent_orders(
        &self,
        customer_id: UserId,
        limit: i64,
    ) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool)
            .recent_for_customer(customer_id, limit)
            .await
    }

    async fn place_supply_request(
        &self,
        request: &NewSupplyRequest,
    ) -> Result<SupplyReceipt, RepositoryError> {
        SupplyRequestRepository::new(&self.pool)
            .create(request)
            .await
    }

    async fn apply_override(
        &self,
        user_id: UserId,
        user_update: &UserFieldUpdate,
        store_id: StoreId,
        product_name: &str,
        product_update: &ProductFieldUpdate,
    ) -> Result<(User, Product), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if users::update_field(&mut *tx, user_id, user_update).await? == 0 {
            return Err(RepositoryError::NotFound);
        }
        if products::update_field(&mut *tx, store_id, product_name, product_update).await? == 0 {
            return Err(RepositoryError::NotFound);
        }

        let user = users::fetch_user(&mut *tx, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        let product = products::fetch_product(&mut *tx, store_id, product_name)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        tx.commit().await?;

        Ok((user, product))
    }

    async fn recent_product_updates(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductUpdate>, RepositoryError> {
        ReportRepository::new(&self.pool)
            .recent_product_updates(limit)
            .await
    }

    async fn popular_products(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductPopularity>, RepositoryError> {
        ReportRepository::new(&self.pool).popular_products(limit).await
    }

    async fn popular_customers(
        &self,
        limit: i64,
    ) -> Result<Vec<CustomerActivity>, RepositoryError> {
        ReportRepository::new(&self.pool).popular_customers(limit).await
    }
}
