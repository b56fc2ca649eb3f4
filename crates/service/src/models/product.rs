//! Product domain types.

use marketplace_core::{Price, StoreId, Tabular};

/// A product stocked by one store, keyed by `(store_id, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub store_id: StoreId,
    pub name: String,
    pub units: i32,
    pub price: Price,
}

/// A manager's overwrite of a product's stock and price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChange {
    pub store_id: StoreId,
    pub product_name: String,
    pub units: i32,
    pub price: Price,
}

impl Tabular for Product {
    const HEADERS: &'static [&'static str] =
        &["storeID", "productName", "numberOfUnits", "pricePerUnit"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.store_id.to_string(),
            self.name.clone(),
            self.units.to_string(),
            self.price.to_string(),
        ]
    }
}
