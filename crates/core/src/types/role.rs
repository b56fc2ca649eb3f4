//! User roles.

use serde::{Deserialize, Serialize};

use super::input::InputError;

/// Role stored in the `type` column of `Users`.
///
/// The column is `CHAR(n)` and historical rows mix case (`Customer`,
/// `manager`), so parsing trims and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Browses stores and places orders.
    #[default]
    Customer,
    /// Updates products and requests supply.
    Manager,
    /// May override user and product columns.
    Admin,
}

impl UserRole {
    /// Value written to the `type` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(InputError::UnknownRole(s.trim().to_owned())),
        }
    }
}
