//! Integration tests for the marketplace console.
//!
//! # Running Tests
//!
//! ```bash
//! # Scenario tests over the in-memory marketplace
//! cargo test -p marketplace-integration-tests
//!
//! # Also run the tests against a live PostgreSQL (the schema is dropped
//! # and recreated on every test)
//! MARKETPLACE_TEST_DATABASE_URL=postgres://localhost/marketplace_test \
//!     cargo test -p marketplace-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `scenarios` - Cross-service workflows over [`MemoryMarketplace`]
//! - `postgres_gateway` - The same rules through [`PgMarketplace`]

use marketplace_core::{Coordinates, Price, StoreId, UserId, UserRole};
use marketplace_service::services::Session;
use marketplace_service::{MemoryMarketplace, PgMarketplace};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;

/// DDL plus seed rows for the live database tests.
///
/// Seeds the same users, stores, and products as [`seeded_memory`].
pub const SCHEMA: &str = include_str!("../fixtures/schema.sql");

/// Environment variable holding the live test database URL.
pub const DATABASE_URL_VAR: &str = "MARKETPLACE_TEST_DATABASE_URL";

/// Serializes live tests, which all recreate the same schema.
pub static LIVE_DB_LOCK: Mutex<()> = Mutex::const_new(());

/// IDs of the seeded rows.
pub mod seed {
    use super::{StoreId, UserId};

    pub const CUSTOMER: UserId = UserId::new(1);
    pub const MANAGER: UserId = UserId::new(2);
    pub const ADMIN: UserId = UserId::new(3);
    pub const NEAR_STORE: StoreId = StoreId::new(1);
    pub const FAR_STORE: StoreId = StoreId::new(2);
}

/// Session for a seeded user.
#[must_use]
pub fn session(user_id: UserId, name: &str) -> Session {
    Session {
        user_id,
        name: name.to_owned(),
    }
}

/// Price from a count of cents.
#[must_use]
pub fn cents(amount: i64) -> Price {
    Price::new(Decimal::new(amount, 2))
}

/// In-memory marketplace holding the seed rows.
///
/// alice (customer) at the origin, mallory (manager), root (admin); store 1
/// is 20 away from alice and store 2 is 40 away.
#[must_use]
pub fn seeded_memory() -> MemoryMarketplace {
    let mut db = MemoryMarketplace::new();
    db.add_user(
        "alice",
        "pw",
        Some(Coordinates::new(0.0, 0.0)),
        UserRole::Customer,
    );
    let manager = db.add_user(
        "mallory",
        "pw",
        Some(Coordinates::new(5.0, 5.0)),
        UserRole::Manager,
    );
    db.add_user("root", "pw", Some(Coordinates::new(9.0, 9.0)), UserRole::Admin);

    let near = db.add_store("Near", Some(Coordinates::new(20.0, 0.0)), Some(manager));
    let far = db.add_store("Far", Some(Coordinates::new(40.0, 0.0)), Some(manager));
    db.add_product(near, "Widget", 10, cents(250));
    db.add_product(near, "Gadget", 3, cents(999));
    db.add_product(far, "Widget", 7, cents(275));
    db
}

/// Connect to the live test database and reset it to the seed rows.
///
/// Returns `None` when the database URL is not set.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or schema reset fails.
pub async fn seeded_postgres() -> Result<Option<PgMarketplace>, sqlx::Error> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await?;

    Ok(Some(PgMarketplace::new(pool)))
}
