//! Parsing of console field input.

use std::str::FromStr;

use thiserror::Error;

/// Errors raised while turning console text into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A numeric field did not parse.
    #[error("invalid {field}: '{value}' is not a number")]
    NotANumber {
        /// Human-readable field label.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The column is not one an admin may update.
    #[error("column '{column}' cannot be updated on {entity}")]
    UnknownColumn {
        /// Entity the column was requested on.
        entity: &'static str,
        /// The rejected column name.
        column: String,
    },

    /// The role is not one of customer, manager, or admin.
    #[error("unknown user type: '{0}'")]
    UnknownRole(String),
}

/// Parse a trimmed numeric field.
///
/// # Errors
///
/// Returns `InputError::NotANumber` naming `field` when `raw` does not parse.
pub fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    raw.trim().parse().map_err(|_| InputError::NotANumber {
        field,
        value: raw.trim().to_owned(),
    })
}
