//! Login and registration.

use marketplace_core::{Coordinates, UserId, UserRole};
use tracing::{info, warn};

use crate::db::Marketplace;
use crate::error::{Result, WorkflowError};
use crate::models::{NewUser, User};

/// The authenticated actor for one console interaction.
///
/// Dropped on logout. Holds no role; roles are looked up per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
}

/// Session service.
pub struct SessionService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> SessionService<'a> {
    /// Create a new session service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// Log in with a name and plaintext password.
    ///
    /// Both fields are compared by exact equality. When several rows match
    /// the lowest user ID wins.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Unauthenticated` if no user matches.
    pub async fn login(&self, name: &str, password: &str) -> Result<Session> {
        let user = self
            .db
            .find_user_by_credentials(name, password)
            .await?
            .ok_or_else(|| {
                warn!(name, "Login failed");
                WorkflowError::Unauthenticated
            })?;

        info!(user_id = %user.id, "Logged in");
        Ok(Session {
            user_id: user.id,
            name: user.name,
        })
    }

    /// Register a new customer.
    ///
    /// Names are not unique; registering an existing name creates another
    /// user. Empty names and passwords are stored as given.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the insert fails.
    pub async fn register(
        &self,
        name: &str,
        password: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<UserId> {
        let id = self
            .db
            .create_user(&NewUser {
                name: name.to_owned(),
                password: password.to_owned(),
                location: Coordinates::new(latitude, longitude),
                role: UserRole::Customer,
            })
            .await?;

        info!(user_id = %id, "Registered customer");
        Ok(id)
    }

    /// Reload the session's user.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` if the user no longer exists.
    pub async fn current_user(&self, session: &Session) -> Result<User> {
        self.db
            .get_user(session.user_id)
            .await?
            .ok_or(WorkflowError::NotFound("user"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::fixtures;

    #[tokio::test]
    async fn test_login_matching_one_row() {
        let w = fixtures::world();
        let session = SessionService::new(&w.db)
            .login("alice", "secret")
            .await
            .unwrap();
        assert_eq!(session, w.customer);
    }

    #[tokio::test]
    async fn test_login_matching_no_rows() {
        let w = fixtures::world();
        let service = SessionService::new(&w.db);
        assert!(matches!(
            service.login("alice", "wrong").await,
            Err(WorkflowError::Unauthenticated)
        ));
        assert!(matches!(
            service.login("nobody", "secret").await,
            Err(WorkflowError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let w = fixtures::world();
        let result = SessionService::new(&w.db).login("Alice", "secret").await;
        assert!(matches!(result, Err(WorkflowError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_register_creates_customer() {
        let w = fixtures::world();
        let service = SessionService::new(&w.db);
        let id = service.register("bob", "pw", 1.5, 2.5).await.unwrap();

        let user = w.db.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.location, Some(Coordinates::new(1.5, 2.5)));

        let session = service.login("bob", "pw").await.unwrap();
        assert_eq!(session.user_id, id);
    }

    #[tokio::test]
    async fn test_register_allows_duplicate_names() {
        let w = fixtures::world();
        let service = SessionService::new(&w.db);
        let first = service.register("alice", "other", 0.0, 0.0).await.unwrap();
        assert_ne!(first, w.customer.user_id);
    }

    #[tokio::test]
    async fn test_register_accepts_empty_name() {
        let w = fixtures::world();
        let service = SessionService::new(&w.db);
        let id = service.register("", "", 0.0, 0.0).await.unwrap();

        assert_eq!(w.db.get_user(id).await.unwrap().unwrap().name, "");
        assert_eq!(service.login("", "").await.unwrap().user_id, id);
    }
}
