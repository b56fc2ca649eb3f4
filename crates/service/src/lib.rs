//! Marketplace Service - persistence gateway and order workflow.
//!
//! # Architecture
//!
//! - [`db`] - Single-connection `PostgreSQL` gateway, repositories, and the
//!   [`Marketplace`](db::Marketplace) data-access port with Postgres and
//!   in-memory adapters
//! - [`models`] - Domain row types and their tabular rendering
//! - [`services`] - Session/identity, catalog, ordering, inventory, admin
//!   overrides, and reporting views
//! - [`config`] - Connection settings from arguments and environment
//! - [`error`] - The workflow error taxonomy surfaced to the console
//!
//! Every operation takes an explicit [`Session`](services::Session) and a
//! `&dyn Marketplace`; nothing is cached in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{Marketplace, MemoryMarketplace, PgMarketplace, RepositoryError};
pub use error::{Result, WorkflowError};
