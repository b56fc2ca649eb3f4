//! Domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. Each one that reaches the console implements
//! [`Tabular`](marketplace_core::Tabular).

pub mod order;
pub mod product;
pub mod report;
pub mod store;
pub mod supply;
pub mod user;

pub use order::{NewOrder, Order};
pub use product::{Product, ProductChange};
pub use report::{CustomerActivity, ProductPopularity, ProductUpdate};
pub use store::{NearbyStore, Store};
pub use supply::{NewSupplyRequest, SupplyReceipt, SupplyRequest};
pub use user::{NewUser, User};

/// Timestamp format used when rendering rows.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
