//! Admin overrides.
//!
//! An override writes one user column and one product column in a single
//! transaction. Columns come from the closed [`UserField`] and
//! [`ProductField`] sets.
//!
//! [`UserField`]: marketplace_core::UserField
//! [`ProductField`]: marketplace_core::ProductField

use marketplace_core::{ProductFieldUpdate, StoreId, UserFieldUpdate, UserId, UserRole};
use tracing::info;

use super::{Session, require_role};
use crate::db::Marketplace;
use crate::error::{Result, WorkflowError};
use crate::models::{Product, User};

/// Admin service.
pub struct AdminService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> AdminService<'a> {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// Check the acting user is an admin before collecting further input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AuthorizationDenied` for non-admins.
    pub async fn authorize(&self, session: &Session) -> Result<()> {
        require_role(self.db, session, UserRole::Admin).await?;
        Ok(())
    }

    /// Apply one user update and one product update together.
    ///
    /// Returns the user and product as they read after the change.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AuthorizationDenied` for non-admins.
    /// Returns `WorkflowError::NotFound` if the user or the store's product
    /// does not exist; nothing is written in that case.
    pub async fn apply_override(
        &self,
        session: &Session,
        user_id: UserId,
        user_update: &UserFieldUpdate,
        store_id: StoreId,
        product_name: &str,
        product_update: &ProductFieldUpdate,
    ) -> Result<(User, Product)> {
        let admin = require_role(self.db, session, UserRole::Admin).await?;

        if self.db.get_user(user_id).await?.is_none() {
            return Err(WorkflowError::NotFound("user"));
        }
        if self.db.get_product(store_id, product_name).await?.is_none() {
            return Err(WorkflowError::NotFound("product"));
        }

        let (user, product) = self
            .db
            .apply_override(user_id, user_update, store_id, product_name, product_update)
            .await?;

        info!(
            admin_id = %admin.id,
            user_id = %user_id,
            user_column = user_update.field().column(),
            store_id = %store_id,
            product = product_name,
            "Admin override applied"
        );
        Ok((user, product))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::fixtures::{self, price};
    use marketplace_core::Coordinates;

    #[tokio::test]
    async fn test_admin_overrides_user_and_product() {
        let w = fixtures::world();
        let (user, product) = AdminService::new(&w.db)
            .apply_override(
                &w.admin,
                w.customer.user_id,
                &UserFieldUpdate::Role(UserRole::Manager),
                w.near_store,
                "Widget",
                &ProductFieldUpdate::PricePerUnit(price(1234)),
            )
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Manager);
        assert_eq!(product.price, price(1234));
        assert_eq!(product.units, 10);
    }

    #[tokio::test]
    async fn test_override_latitude_keeps_longitude() {
        let w = fixtures::world();
        let (user, _) = AdminService::new(&w.db)
            .apply_override(
                &w.admin,
                w.manager.user_id,
                &UserFieldUpdate::Latitude(1.0),
                w.near_store,
                "Gadget",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await
            .unwrap();
        assert_eq!(user.location, Some(Coordinates::new(1.0, 10.0)));
    }

    #[tokio::test]
    async fn test_override_password_allows_new_login() {
        let w = fixtures::world();
        AdminService::new(&w.db)
            .apply_override(
                &w.admin,
                w.customer.user_id,
                &UserFieldUpdate::Password("hunter2".into()),
                w.near_store,
                "Widget",
                &ProductFieldUpdate::NumberOfUnits(10),
            )
            .await
            .unwrap();

        let found = w.db.find_user_by_credentials("alice", "hunter2").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(w.customer.user_id));
    }

    #[tokio::test]
    async fn test_override_requires_admin() {
        let w = fixtures::world();
        let result = AdminService::new(&w.db)
            .apply_override(
                &w.manager,
                w.customer.user_id,
                &UserFieldUpdate::Name("eve".into()),
                w.near_store,
                "Widget",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await;

        assert!(matches!(
            result,
            Err(WorkflowError::AuthorizationDenied {
                required: UserRole::Admin
            })
        ));
        let user = w.db.get_user(w.customer.user_id).await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
    }

    #[tokio::test]
    async fn test_override_unknown_user_writes_nothing() {
        let w = fixtures::world();
        let result = AdminService::new(&w.db)
            .apply_override(
                &w.admin,
                UserId::new(404),
                &UserFieldUpdate::Name("eve".into()),
                w.near_store,
                "Widget",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound("user"))));
        let widget = w.db.get_product(w.near_store, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.units, 10);
    }

    #[tokio::test]
    async fn test_override_unknown_product_writes_nothing() {
        let w = fixtures::world();
        let result = AdminService::new(&w.db)
            .apply_override(
                &w.admin,
                w.customer.user_id,
                &UserFieldUpdate::Name("eve".into()),
                w.far_store,
                "Gadget",
                &ProductFieldUpdate::NumberOfUnits(0),
            )
            .await;

        assert!(matches!(result, Err(WorkflowError::NotFound("product"))));
        let user = w.db.get_user(w.customer.user_id).await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
    }
}
