//! Row types for the reporting views.

use chrono::NaiveDateTime;

use marketplace_core::{StoreId, Tabular, UpdateNumber, UserId};

use super::TIMESTAMP_FORMAT;

/// One entry of the `ProductUpdates` log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub number: UpdateNumber,
    pub manager_id: UserId,
    pub store_id: StoreId,
    pub product_name: String,
    pub updated_on: NaiveDateTime,
}

/// Number of orders placed for a product name, across stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPopularity {
    pub product_name: String,
    pub order_count: i64,
}

/// Number of orders placed by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerActivity {
    pub customer_id: UserId,
    pub order_count: i64,
}

impl Tabular for ProductUpdate {
    const HEADERS: &'static [&'static str] =
        &["updateNumber", "managerID", "storeID", "productName", "updatedOn"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.manager_id.to_string(),
            self.store_id.to_string(),
            self.product_name.clone(),
            self.updated_on.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

impl Tabular for ProductPopularity {
    const HEADERS: &'static [&'static str] = &["productName", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![self.product_name.clone(), self.order_count.to_string()]
    }
}

impl Tabular for CustomerActivity {
    const HEADERS: &'static [&'static str] = &["customerID", "orders"];

    fn cells(&self) -> Vec<String> {
        vec![self.customer_id.to_string(), self.order_count.to_string()]
    }
}
