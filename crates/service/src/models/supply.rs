//! Supply request domain types.

use marketplace_core::{RequestNumber, StoreId, Tabular, UserId, WarehouseId};

/// A manager's request for stock from a warehouse. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyRequest {
    pub number: RequestNumber,
    pub manager_id: UserId,
    pub warehouse_id: WarehouseId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units: i32,
}

/// Input for a supply request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplyRequest {
    pub manager_id: UserId,
    pub warehouse_id: WarehouseId,
    pub store_id: StoreId,
    pub product_name: String,
    pub units: i32,
}

/// A recorded supply request and the product's unit count afterwards.
///
/// `remaining_units` is `None` when no matching product row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyReceipt {
    pub request: SupplyRequest,
    pub remaining_units: Option<i32>,
}

impl Tabular for SupplyRequest {
    const HEADERS: &'static [&'static str] = &[
        "requestNumber",
        "managerID",
        "warehouseID",
        "storeID",
        "productName",
        "unitsRequested",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.to_string(),
            self.manager_id.to_string(),
            self.warehouse_id.to_string(),
            self.store_id.to_string(),
            self.product_name.clone(),
            self.units.to_string(),
        ]
    }
}
