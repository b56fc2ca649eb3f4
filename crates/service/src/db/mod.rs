//! Persistence gateway for the marketplace `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `Users` - Customers, managers, and admins (plaintext credentials)
//! - `Store` - Stores with coordinates and managing user
//! - `Product` - Stock and price per `(storeID, productName)`
//! - `Orders` - Append-only customer orders
//! - `ProductUpdates` - Log of manager product updates
//! - `ProductSupplyRequests` - Append-only warehouse supply requests
//!
//! The schema is owned elsewhere; nothing here creates or migrates tables.
//!
//! # Layout
//!
//! - Repositories (`users`, `stores`, `products`, `orders`, `supply_requests`,
//!   `reports`) hold parameter-bound statements against a borrowed pool.
//! - [`Marketplace`] is the data-access port the workflow is written against.
//! - [`PgMarketplace`] implements it over a single connection;
//!   [`MemoryMarketplace`] implements it in-process.

pub mod marketplace;
pub mod memory;
pub mod orders;
pub mod postgres;
pub mod products;
pub mod reports;
pub mod stores;
pub mod supply_requests;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use marketplace::Marketplace;
pub use memory::MemoryMarketplace;
pub use postgres::PgMarketplace;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A computed column value does not fit its integer type.
    #[error("{0} out of range")]
    ValueOutOfRange(&'static str),
}

/// Open the single database connection used for the whole session.
///
/// The pool is capped at one connection so every statement in the process
/// goes over the same session.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.username)
        .password(config.password.expose_secret());

    PgPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Map a `type` column value to a role, flagging unknown values as corruption.
pub(crate) fn parse_role(raw: &str) -> Result<marketplace_core::UserRole, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid user type in database: {e}")))
}

/// Combine nullable coordinate columns into a location.
pub(crate) fn location(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Option<marketplace_core::Coordinates> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(marketplace_core::Coordinates::new(lat, lon)),
        _ => None,
    }
}
