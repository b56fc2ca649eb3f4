//! Core types for the marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod field;
pub mod geo;
pub mod id;
pub mod input;
pub mod price;
pub mod role;

pub use field::{ProductField, ProductFieldUpdate, UserField, UserFieldUpdate};
pub use geo::{Coordinates, PROXIMITY_THRESHOLD_MILES, distance, within_range};
pub use id::*;
pub use input::{InputError, parse_number};
pub use price::Price;
pub use role::UserRole;
