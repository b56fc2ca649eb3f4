//! Two-level console menu.
//!
//! The pre-login menu offers registration and login. A successful login
//! opens the operations menu for that [`Session`] until logout. Operation
//! failures are printed and the menu is shown again; only connection
//! failures and console I/O errors leave the loop. End of input exits
//! cleanly from either menu.

mod account;
mod management;
mod prompt;
mod reports;
mod shopping;

pub use prompt::Prompt;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info};

use marketplace_core::InputError;
use marketplace_service::services::Session;
use marketplace_service::{Marketplace, WorkflowError};

/// Errors that end or abort a console interaction.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading from or writing to the console failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The operation failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A field did not parse.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The input stream closed.
    #[error("end of input")]
    EndOfInput,
}

const GREETING: &str = "\n\n*******************************************************\n              Marketplace Console\n*******************************************************\n\n";

const MAIN_MENU: &str = "\nMAIN MENU\n---------\n1. Create user\n2. Log in\n9. < EXIT\n";

const USER_MENU: &str = "\nMAIN MENU\n---------\n\
1. View Stores within 30 miles\n\
2. View Product List\n\
3. Place an Order\n\
4. View 5 recent orders\n\
5. Update Product\n\
6. View 5 recent Product Updates Info\n\
7. View 5 Popular Items\n\
8. View 5 Popular Customers\n\
9. Place Product Supply Request to Warehouse\n\
10. Access Admin Operations\n\
.........................\n\
20. Log out\n";

/// The interactive console.
pub struct Console<'a, R, W> {
    market: &'a dyn Marketplace,
    io: Prompt<R, W>,
}

impl<'a, R, W> Console<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a console reading choices from `reader` and printing to `writer`.
    pub const fn new(market: &'a dyn Marketplace, reader: R, writer: W) -> Self {
        Self {
            market,
            io: Prompt::new(reader, writer),
        }
    }

    /// Hand back the writer, for inspecting output.
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.io.into_writer()
    }

    /// Run the menu loop until exit or end of input.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the console cannot be read or written,
    /// or `ConsoleError::Workflow` for a connection failure.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        match self.main_menu().await {
            Ok(()) | Err(ConsoleError::EndOfInput) => {
                self.io.say("Disconnecting from database...Done\n\nBye !\n").await
            }
            Err(e) => Err(e),
        }
    }

    async fn main_menu(&mut self) -> Result<(), ConsoleError> {
        self.io.say(GREETING).await?;
        loop {
            self.io.say(MAIN_MENU).await?;
            match self.io.choice().await? {
                1 => {
                    let result = self.create_user().await;
                    self.report(result).await?;
                }
                2 => {
                    let result = self.log_in().await;
                    if let Some(session) = self.report(result).await? {
                        self.user_menu(&session).await?;
                    }
                }
                9 => return Ok(()),
                _ => self.io.say("Unrecognized choice!\n").await?,
            }
        }
    }

    async fn user_menu(&mut self, session: &Session) -> Result<(), ConsoleError> {
        loop {
            self.io.say(USER_MENU).await?;
            let result = match self.io.choice().await? {
                1 => self.view_stores(session).await,
                2 => self.view_products().await,
                3 => self.place_order(session).await,
                4 => self.view_recent_orders(session).await,
                5 => self.update_product(session).await,
                6 => self.view_recent_updates().await,
                7 => self.view_popular_products().await,
                8 => self.view_popular_customers().await,
                9 => self.place_supply_request(session).await,
                10 => self.admin_override(session).await,
                20 => {
                    info!(user_id = %session.user_id, "Logged out");
                    return Ok(());
                }
                _ => {
                    self.io.say("Unrecognized choice!\n").await?;
                    continue;
                }
            };
            self.report(result).await?;
        }
    }

    /// Print an operation failure and carry on, or pass a fatal one up.
    async fn report<T>(
        &mut self,
        result: Result<T, ConsoleError>,
    ) -> Result<Option<T>, ConsoleError> {
        let message = match result {
            Ok(value) => return Ok(Some(value)),
            Err(ConsoleError::Workflow(e)) if e.is_fatal() => {
                return Err(ConsoleError::Workflow(e));
            }
            Err(ConsoleError::Workflow(e @ WorkflowError::DataAccess(_))) => {
                error!(error = %e, "Operation failed");
                e.to_string()
            }
            Err(ConsoleError::Workflow(e)) => e.to_string(),
            Err(ConsoleError::Input(e)) => e.to_string(),
            Err(e) => return Err(e),
        };
        self.io.say(&format!("\n{message}\n")).await?;
        Ok(None)
    }
}
