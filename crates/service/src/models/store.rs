//! Store domain types.

use marketplace_core::{Coordinates, StoreId, Tabular, UserId};

/// A physical store.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Store name.
    pub name: String,
    /// Store location, if both coordinates are set.
    pub location: Option<Coordinates>,
    /// User who manages the store.
    pub manager_id: Option<UserId>,
}

/// A store within range of the requester, with its computed distance.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStore {
    pub store_id: StoreId,
    pub name: String,
    pub distance: f64,
}

impl Tabular for NearbyStore {
    const HEADERS: &'static [&'static str] = &["storeID", "name", "distance"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.store_id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.distance),
        ]
    }
}
