//! Business logic for the marketplace console.
//!
//! # Services
//!
//! - `session` - Login and registration
//! - `catalog` - Nearby stores and store product listings
//! - `ordering` - Proximity-gated order placement
//! - `inventory` - Manager product updates and supply requests
//! - `admin` - Admin overrides of user and product columns
//! - `reports` - Fixed-size reporting views
//!
//! Each service borrows a `&dyn Marketplace` and takes the acting
//! [`Session`] explicitly. Roles are looked up on every call rather than
//! cached in the session.

pub mod admin;
pub mod catalog;
pub mod inventory;
pub mod ordering;
pub mod reports;
pub mod session;

pub use admin::AdminService;
pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use ordering::OrderingService;
pub use reports::ReportService;
pub use session::{Session, SessionService};

use marketplace_core::UserRole;
use tracing::warn;

use crate::db::Marketplace;
use crate::error::{Result, WorkflowError};
use crate::models::User;

/// Maximum number of rows any reporting view returns.
pub const REPORT_ROW_LIMIT: i64 = 5;

/// Look up the acting user and check they hold `required`.
///
/// A session whose user no longer exists is denied like any other
/// non-holder of the role.
///
/// # Errors
///
/// Returns `WorkflowError::AuthorizationDenied` if the user is missing or
/// holds a different role.
pub async fn require_role(
    db: &dyn Marketplace,
    session: &Session,
    required: UserRole,
) -> Result<User> {
    match db.get_user(session.user_id).await? {
        Some(user) if user.role == required => Ok(user),
        found => {
            warn!(
                user_id = %session.user_id,
                role = ?found.map(|u| u.role),
                required = %required,
                "Role check failed"
            );
            Err(WorkflowError::AuthorizationDenied { required })
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use marketplace_core::{Coordinates, Price, StoreId, UserId, UserRole};
    use rust_decimal::Decimal;

    use super::Session;
    use crate::db::MemoryMarketplace;

    /// IDs of the seeded rows.
    pub struct World {
        pub db: MemoryMarketplace,
        pub customer: Session,
        pub manager: Session,
        pub admin: Session,
        pub nomad: Session,
        pub near_store: StoreId,
        pub far_store: StoreId,
    }

    fn session(user_id: UserId, name: &str) -> Session {
        Session {
            user_id,
            name: name.to_owned(),
        }
    }

    pub fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2))
    }

    /// Customer at (0,0), a store 20 away and a store 40 away.
    pub fn world() -> World {
        let mut db = MemoryMarketplace::new();
        let customer = db.add_user(
            "alice",
            "secret",
            Some(Coordinates::new(0.0, 0.0)),
            UserRole::Customer,
        );
        let manager = db.add_user(
            "mallory",
            "secret",
            Some(Coordinates::new(10.0, 10.0)),
            UserRole::Manager,
        );
        let admin = db.add_user(
            "root",
            "secret",
            Some(Coordinates::new(50.0, 50.0)),
            UserRole::Admin,
        );
        let nomad = db.add_user("nomad", "secret", None, UserRole::Customer);

        let near_store = db.add_store("Near", Some(Coordinates::new(20.0, 0.0)), Some(manager));
        let far_store = db.add_store("Far", Some(Coordinates::new(40.0, 0.0)), Some(manager));

        db.add_product(near_store, "Widget", 10, price(250));
        db.add_product(near_store, "Gadget", 3, price(999));
        db.add_product(far_store, "Widget", 7, price(275));

        World {
            db,
            customer: session(customer, "alice"),
            manager: session(manager, "mallory"),
            admin: session(admin, "root"),
            nomad: session(nomad, "nomad"),
            near_store,
            far_store,
        }
    }
}
