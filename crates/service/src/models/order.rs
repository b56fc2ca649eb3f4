//! Order domain types.

use chrono::NaiveDateTime;

use marketplace_core::{OrderNumber, StoreId, Tabular, UserId};

use super::TIMESTAMP_FORMAT;

/// A placed order. Orders are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub number: OrderNumber,
    pub customer_id: UserId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units: i32,
    /// Server clock at insert.
    pub placed_at: NaiveDateTime,
}

/// Input for placing an order; the number and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: UserId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units: i32,
}

impl Tabular for Order {
    const HEADERS: &'static [&'static str] = &[
        "orderNumber",
        "customerID",
        "storeID",
        "productName",
        "unitsOrdered",
        "orderTime",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.customer_id.to_string(),
            self.store_id.to_string(),
            self.product_name.clone(),
            self.units.to_string(),
            self.placed_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}
