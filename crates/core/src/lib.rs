//! Marketplace Core - Shared types library.
//!
//! This crate provides common types used across the marketplace console:
//! - `service` - Persistence gateway, repositories, and the order workflow
//! - `cli` - The `mkt` console front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, roles, coordinates, prices, and field updates
//! - [`table`] - String-rendered tabular results

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod table;
pub mod types;

pub use table::{ResultTable, Tabular};
pub use types::*;
