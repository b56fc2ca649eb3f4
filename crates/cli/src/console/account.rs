//! Registration and login.

use tokio::io::{AsyncBufRead, AsyncWrite};

use marketplace_service::services::{Session, SessionService};

use super::{Console, ConsoleError};

impl<R, W> Console<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn create_user(&mut self) -> Result<(), ConsoleError> {
        let name = self.io.ask("Enter name").await?;
        let password = self.io.ask("Enter password").await?;
        let latitude: f64 = self.io.ask_number("latitude", "Enter latitude").await?;
        let longitude: f64 = self.io.ask_number("longitude", "Enter longitude").await?;

        let id = SessionService::new(self.market)
            .register(&name, &password, latitude, longitude)
            .await?;

        self.io
            .say(&format!("\nUser successfully created with userID = {id}\n"))
            .await
    }

    pub(super) async fn log_in(&mut self) -> Result<Session, ConsoleError> {
        let name = self.io.ask("Enter name").await?;
        let password = self.io.ask("Enter password").await?;

        let session = SessionService::new(self.market)
            .login(&name, &password)
            .await?;

        self.io
            .say(&format!("\nWelcome, {}!\n", session.name))
            .await?;
        Ok(session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::UserRole;
    use marketplace_service::Marketplace;

    use crate::console::test_support::{market, session_output};

    #[tokio::test]
    async fn test_create_user_then_log_in() {
        let db = market();
        let out = session_output(&db, "1\nbob\nbuilder\n1.5\n2\n2\nbob\nbuilder\n20\n9\n").await;

        assert!(out.contains("User successfully created with userID = 4"));
        assert!(out.contains("Welcome, bob!"));

        let bob = db.find_user_by_credentials("bob", "builder").await.unwrap().unwrap();
        assert_eq!(bob.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn test_create_user_bad_latitude_aborts() {
        let db = market();
        let out = session_output(&db, "1\nbob\nbuilder\nnorth\n9\n").await;

        assert!(out.contains("invalid latitude: 'north' is not a number"));
        assert!(db.find_user_by_credentials("bob", "builder").await.unwrap().is_none());
    }
}
