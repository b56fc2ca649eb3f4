//! Marketplace console.
//!
//! # Usage
//!
//! ```bash
//! # Connect to database `marketplace` on port 5432 as user `alice`
//! mkt marketplace 5432 alice
//!
//! # Connect to a remote host with a password
//! MARKETPLACE_DB_HOST=db.internal MARKETPLACE_DB_PASSWORD=... mkt marketplace 5432 alice
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use marketplace_service::{DatabaseConfig, PgMarketplace, WorkflowError, db};

mod console;

use console::Console;

const DEFAULT_LOG_FILTER: &str = "marketplace_cli=warn,marketplace_service=warn";

#[derive(Parser)]
#[command(name = "mkt")]
#[command(author, version, about = "Marketplace console")]
struct Cli {
    /// Database name
    dbname: String,

    /// Database server port
    port: u16,

    /// Database user name
    user: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Console failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_args(&cli.dbname, cli.port, &cli.user)?;
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Connecting to database...").await?;
    stdout.flush().await?;
    info!(url = %config.display_url(), password = config.has_password(), "Connecting");

    let pool = match db::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            let err = WorkflowError::ConnectionFailure(e);
            let guidance = format!(
                "\n{err}\nMake sure the server is running and reachable at {}.\n\
                 Set MARKETPLACE_DB_HOST or MARKETPLACE_DB_PASSWORD if it needs them.\n",
                config.display_url()
            );
            stdout.write_all(guidance.as_bytes()).await?;
            stdout.flush().await?;
            return Err(err.into());
        }
    };
    stdout.write_all(b"Done\n").await?;

    let market = PgMarketplace::new(pool);
    let mut console = Console::new(&market, BufReader::new(tokio::io::stdin()), stdout);
    let result = console.run().await;
    market.close().await;

    Ok(result?)
}
