//! In-process adapter for the [`Marketplace`] port.
//!
//! Holds every table in one mutex-guarded state so each operation is atomic,
//! matching the transactional guarantees of the `PostgreSQL` adapter. The
//! clock is logical: it starts at the Unix epoch and advances one minute per
//! timestamped write, which keeps "most recent" orderings deterministic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use tokio::sync::Mutex;

use marketplace_core::{
    Coordinates, OrderNumber, Price, ProductFieldUpdate, RequestNumber, StoreId, UpdateNumber,
    UserFieldUpdate, UserId, UserRole,
};

use super::{Marketplace, RepositoryError};
use crate::models::{
    CustomerActivity, NewOrder, NewSupplyRequest, NewUser, Order, Product, ProductChange,
    ProductPopularity, ProductUpdate, Store, SupplyReceipt, SupplyRequest, User,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<StoredUser>,
    stores: Vec<Store>,
    products: Vec<Product>,
    orders: Vec<Order>,
    product_updates: Vec<ProductUpdate>,
    supply_requests: Vec<SupplyRequest>,
    clock: NaiveDateTime,
}

impl MemoryState {
    fn tick(&mut self) -> NaiveDateTime {
        self.clock += Duration::minutes(1);
        self.clock
    }

    fn next_user_id(&self) -> UserId {
        UserId::new(self.users.iter().map(|u| u.user.id.as_i32()).max().unwrap_or(0) + 1)
    }

    fn next_order_number(&self) -> OrderNumber {
        OrderNumber::new(self.orders.iter().map(|o| o.number.as_i32()).max().unwrap_or(0) + 1)
    }

    fn user_mut(&mut self, id: UserId) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|u| u.user.id == id)
    }

    fn product_mut(&mut self, store_id: StoreId, name: &str) -> Option<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.store_id == store_id && p.name == name)
    }

    fn insert_order(&mut self, order: &NewOrder) -> Order {
        let order = Order {
            number: self.next_order_number(),
            customer_id: order.customer_id,
            store_id: order.store_id,
            product_name: order.product_name.clone(),
            units: order.units,
            placed_at: self.tick(),
        };
        self.orders.push(order.clone());
        order
    }
}

/// Marketplace held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryMarketplace {
    state: Mutex<MemoryState>,
}

impl MemoryMarketplace {
    /// Create an empty marketplace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user and return its ID.
    pub fn add_user(
        &mut self,
        name: &str,
        password: &str,
        location: Option<Coordinates>,
        role: UserRole,
    ) -> UserId {
        let state = self.state.get_mut();
        let id = state.next_user_id();
        state.users.push(StoredUser {
            user: User {
                id,
                name: name.to_owned(),
                location,
                role,
            },
            password: password.to_owned(),
        });
        id
    }

    /// Seed a store and return its ID.
    pub fn add_store(
        &mut self,
        name: &str,
        location: Option<Coordinates>,
        manager_id: Option<UserId>,
    ) -> StoreId {
        let state = self.state.get_mut();
        let id = StoreId::new(state.stores.iter().map(|s| s.id.as_i32()).max().unwrap_or(0) + 1);
        state.stores.push(Store {
            id,
            name: name.to_owned(),
            location,
            manager_id,
        });
        id
    }

    /// Seed a product.
    pub fn add_product(&mut self, store_id: StoreId, name: &str, units: i32, price: Price) {
        self.state.get_mut().products.push(Product {
            store_id,
            name: name.to_owned(),
            units,
            price,
        });
    }

    /// Seed an order and return its number.
    pub fn add_order(
        &mut self,
        customer_id: UserId,
        store_id: StoreId,
        product_name: &str,
        units: i32,
    ) -> OrderNumber {
        self.state
            .get_mut()
            .insert_order(&NewOrder {
                customer_id,
                store_id,
                product_name: product_name.to_owned(),
                units,
            })
            .number
    }

    /// Snapshot of every order.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }

    /// Snapshot of every supply request.
    pub async fn supply_requests(&self) -> Vec<SupplyRequest> {
        self.state.lock().await.supply_requests.clone()
    }

    /// Snapshot of the product update log.
    pub async fn product_updates(&self) -> Vec<ProductUpdate> {
        self.state.lock().await.product_updates.clone()
    }
}

fn take(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl Marketplace for MemoryMarketplace {
    async fn find_user_by_credentials(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|u| u.user.name == name && u.password == password)
            .min_by_key(|u| u.user.id)
            .map(|u| u.user.clone()))
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        let mut state = self.state.lock().await;
        let id = state.next_user_id();
        state.users.push(StoredUser {
            user: User {
                id,
                name: user.name.clone(),
                location: Some(user.location),
                role: user.role,
            },
            password: user.password.clone(),
        });
        Ok(id)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.user.id == id)
            .map(|u| u.user.clone()))
    }

    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        let mut stores = self.state.lock().await.stores.clone();
        stores.sort_by_key(|s| s.id);
        Ok(stores)
    }

    async fn get_store(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.stores.iter().find(|s| s.id == id).cloned())
    }

    async fn list_products(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.lock().await;
        let mut products: Vec<Product> = state
            .products
            .iter()
            .filter(|p| p.store_id == store_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .products
            .iter()
            .find(|p| p.store_id == store_id && p.name == name)
            .cloned())
    }

    async fn update_product(
        &self,
        manager_id: UserId,
        change: &ProductChange,
    ) -> Result<Product, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = state
            .product_mut(change.store_id, &change.product_name)
            .ok_or(RepositoryError::NotFound)?;
        product.units = change.units;
        product.price = change.price;
        let updated = product.clone();

        let updated_on = state.tick();
        let number = i32::try_from(state.product_updates.len())
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?
            + 1;
        state.product_updates.push(ProductUpdate {
            number: UpdateNumber::new(number),
            manager_id,
            store_id: change.store_id,
            product_name: change.product_name.clone(),
            updated_on,
        });

        Ok(updated)
    }

    async fn place_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        Ok(self.state.lock().await.insert_order(order))
    }

    async fn recent_orders(
        &self,
        customer_id: UserId,
        limit: i64,
    ) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.lock().await;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            b.placed_at
                .cmp(&a.placed_at)
                .then_with(|| b.number.cmp(&a.number))
        });
        orders.truncate(take(limit));
        Ok(orders)
    }

    async fn place_supply_request(
        &self,
        request: &NewSupplyRequest,
    ) -> Result<SupplyReceipt, RepositoryError> {
        let mut state = self.state.lock().await;
        let number = i32::try_from(state.supply_requests.len())
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?
            + 1;
        let remaining_units = match state.product_mut(request.store_id, &request.product_name) {
            Some(product) => {
                product.units = product
                    .units
                    .checked_sub(request.units)
                    .ok_or(RepositoryError::ValueOutOfRange("numberOfUnits"))?;
                Some(product.units)
            }
            None => None,
        };
        let recorded = SupplyRequest {
            number: RequestNumber::new(number),
            manager_id: request.manager_id,
            warehouse_id: request.warehouse_id,
            store_id: request.store_id,
            product_name: request.product_name.clone(),
            units: request.units,
        };
        state.supply_requests.push(recorded.clone());

        Ok(SupplyReceipt {
            request: recorded,
            remaining_units,
        })
    }

    async fn apply_override(
        &self,
        user_id: UserId,
        user_update: &UserFieldUpdate,
        store_id: StoreId,
        product_name: &str,
        product_update: &ProductFieldUpdate,
    ) -> Result<(User, Product), RepositoryError> {
        let mut state = self.state.lock().await;
        if state.user_mut(user_id).is_none() || state.product_mut(store_id, product_name).is_none()
        {
            return Err(RepositoryError::NotFound);
        }

        let stored = state.user_mut(user_id).ok_or(RepositoryError::NotFound)?;
        match user_update {
            UserFieldUpdate::Name(name) => stored.user.name.clone_from(name),
            UserFieldUpdate::Password(password) => stored.password.clone_from(password),
            UserFieldUpdate::Latitude(latitude) => {
                let longitude = stored.user.location.map_or(0.0, |c| c.longitude);
                stored.user.location = Some(Coordinates::new(*latitude, longitude));
            }
            UserFieldUpdate::Longitude(longitude) => {
                let latitude = stored.user.location.map_or(0.0, |c| c.latitude);
                stored.user.location = Some(Coordinates::new(latitude, *longitude));
            }
            UserFieldUpdate::Role(role) => stored.user.role = *role,
        }
        let user = stored.user.clone();

        let product = state
            .product_mut(store_id, product_name)
            .ok_or(RepositoryError::NotFound)?;
        match product_update {
            ProductFieldUpdate::NumberOfUnits(units) => product.units = *units,
            ProductFieldUpdate::PricePerUnit(price) => product.price = *price,
        }

        Ok((user, product.clone()))
    }

    async fn recent_product_updates(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductUpdate>, RepositoryError> {
        let state = self.state.lock().await;
        let mut updates = state.product_updates.clone();
        updates.sort_by(|a, b| {
            b.updated_on
                .cmp(&a.updated_on)
                .then_with(|| b.number.cmp(&a.number))
        });
        updates.truncate(take(limit));
        Ok(updates)
    }

    async fn popular_products(
        &self,
        limit: i64,
    ) -> Result<Vec<ProductPopularity>, RepositoryError> {
        let state = self.state.lock().await;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for order in &state.orders {
            *counts.entry(order.product_name.as_str()).or_insert(0) += 1;
        }
        let mut ranked: Vec<ProductPopularity> = counts
            .into_iter()
            .map(|(name, order_count)| ProductPopularity {
                product_name: name.to_owned(),
                order_count,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.order_count
                .cmp(&a.order_count)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        ranked.truncate(take(limit));
        Ok(ranked)
    }

    async fn popular_customers(
        &self,
        limit: i64,
    ) -> Result<Vec<CustomerActivity>, RepositoryError> {
        let state = self.state.lock().await;
        let mut counts: BTreeMap<UserId, i64> = BTreeMap::new();
        for order in &state.orders {
            *counts.entry(order.customer_id).or_insert(0) += 1;
        }
        let mut ranked: Vec<CustomerActivity> = counts
            .into_iter()
            .map(|(customer_id, order_count)| CustomerActivity {
                customer_id,
                order_count,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.order_count
                .cmp(&a.order_count)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });
        ranked.truncate(take(limit));
        Ok(ranked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use marketplace_core::WarehouseId;
    use rust_decimal::Decimal;

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2))
    }

    fn market() -> (MemoryMarketplace, UserId, StoreId) {
        let mut db = MemoryMarketplace::new();
        let user = db.add_user("alice", "pw", None, UserRole::Customer);
        let store = db.add_store("Corner", Some(Coordinates::new(1.0, 1.0)), None);
        db.add_product(store, "Widget", 10, price(250));
        (db, user, store)
    }

    fn order(customer_id: UserId, store_id: StoreId) -> NewOrder {
        NewOrder {
            customer_id,
            store_id,
            product_name: "Widget".into(),
            units: 1,
        }
    }

    #[tokio::test]
    async fn test_first_order_is_number_one() {
        let (db, user, store) = market();
        let placed = db.place_order(&order(user, store)).await.unwrap();
        assert_eq!(placed.number, OrderNumber::new(1));
    }

    #[tokio::test]
    async fn test_order_number_follows_maximum() {
        let (mut db, user, store) = market();
        db.add_order(user, store, "Widget", 1);
        db.add_order(user, store, "Widget", 1);
        let placed = db.place_order(&order(user, store)).await.unwrap();
        assert_eq!(placed.number, OrderNumber::new(3));
    }

    #[tokio::test]
    async fn test_clock_advances_per_write() {
        let (db, user, store) = market();
        let first = db.place_order(&order(user, store)).await.unwrap();
        let second = db.place_order(&order(user, store)).await.unwrap();
        assert!(second.placed_at > first.placed_at);
    }

    #[tokio::test]
    async fn test_credentials_pick_lowest_id() {
        let (mut db, first, _) = market();
        db.add_user("alice", "pw", None, UserRole::Admin);
        let found = db.find_user_by_credentials("alice", "pw").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first));
    }

    #[tokio::test]
    async fn test_update_missing_product_writes_nothing() {
        let (db, user, store) = market();
        let change = ProductChange {
            store_id: store,
            product_name: "Sprocket".into(),
            units: 1,
            price: price(1),
        };
        assert!(matches!(
            db.update_product(user, &change).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(db.product_updates().await.is_empty());
    }

    #[tokio::test]
    async fn test_supply_request_without_product() {
        let (db, user, store) = market();
        let receipt = db
            .place_supply_request(&NewSupplyRequest {
                manager_id: user,
                warehouse_id: WarehouseId::new(9),
                store_id: store,
                product_name: "Sprocket".into(),
                units: 4,
            })
            .await
            .unwrap();
        assert_eq!(receipt.remaining_units, None);
        assert_eq!(receipt.request.number, RequestNumber::new(1));
    }

    #[tokio::test]
    async fn test_supply_request_overflow_records_nothing() {
        let (mut db, user, store) = market();
        db.add_product(store, "Bolt", i32::MIN + 1, price(1));
        let result = db
            .place_supply_request(&NewSupplyRequest {
                manager_id: user,
                warehouse_id: WarehouseId::new(1),
                store_id: store,
                product_name: "Bolt".into(),
                units: 2,
            })
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::ValueOutOfRange("numberOfUnits"))
        ));
        assert!(db.supply_requests().await.is_empty());
        let bolt = db.get_product(store, "Bolt").await.unwrap().unwrap();
        assert_eq!(bolt.units, i32::MIN + 1);
    }

    #[tokio::test]
    async fn test_override_missing_product_leaves_user() {
        let (db, user, store) = market();
        let result = db
            .apply_override(
                user,
                &UserFieldUpdate::Name("eve".into()),
                store,
                "Sprocket",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(db.get_user(user).await.unwrap().unwrap().name, "alice");
    }

    #[tokio::test]
    async fn test_override_longitude_without_location() {
        let (db, user, store) = market();
        let (updated, _) = db
            .apply_override(
                user,
                &UserFieldUpdate::Longitude(3.0),
                store,
                "Widget",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await
            .unwrap();
        assert_eq!(updated.location, Some(Coordinates::new(0.0, 3.0)));
    }
}
