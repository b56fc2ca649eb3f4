//! Closed sets of columns an admin may overwrite.
//!
//! Column names typed at the console are resolved to one of these enums and
//! the new value is parsed into the matching variant of the update type.
//! Statement builders match on the update variant; raw column text never
//! reaches SQL.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::input::{InputError, parse_number};
use super::price::Price;
use super::role::UserRole;

/// Updatable column of a `Users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Name,
    Password,
    Latitude,
    Longitude,
    Role,
}

/// A typed new value for one `Users` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum UserFieldUpdate {
    Name(String),
    Password(String),
    Latitude(f64),
    Longitude(f64),
    Role(UserRole),
}

impl UserField {
    /// All updatable user columns, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Password,
        Self::Latitude,
        Self::Longitude,
        Self::Role,
    ];

    /// Column name as it appears in the schema.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Password => "password",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Role => "type",
        }
    }

    /// Parse console text into a typed update for this column.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the value does not parse for the column's
    /// type.
    pub fn parse_value(self, raw: &str) -> Result<UserFieldUpdate, InputError> {
        let value = raw.trim();
        match self {
            Self::Name => Ok(UserFieldUpdate::Name(value.to_owned())),
            Self::Password => Ok(UserFieldUpdate::Password(value.to_owned())),
            Self::Latitude => parse_number("latitude", value).map(UserFieldUpdate::Latitude),
            Self::Longitude => parse_number("longitude", value).map(UserFieldUpdate::Longitude),
            Self::Role => value.parse().map(UserFieldUpdate::Role),
        }
    }
}

impl UserFieldUpdate {
    /// The column this update writes.
    #[must_use]
    pub const fn field(&self) -> UserField {
        match self {
            Self::Name(_) => UserField::Name,
            Self::Password(_) => UserField::Password,
            Self::Latitude(_) => UserField::Latitude,
            Self::Longitude(_) => UserField::Longitude,
            Self::Role(_) => UserField::Role,
        }
    }
}

impl FromStr for UserField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "password" => Ok(Self::Password),
            "latitude" => Ok(Self::Latitude),
            "longitude" => Ok(Self::Longitude),
            "type" | "role" => Ok(Self::Role),
            _ => Err(InputError::UnknownColumn {
                entity: "Users",
                column: s.trim().to_owned(),
            }),
        }
    }
}

/// Updatable column of a `Product` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    NumberOfUnits,
    PricePerUnit,
}

/// A typed new value for one `Product` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProductFieldUpdate {
    NumberOfUnits(i32),
    PricePerUnit(Price),
}

impl ProductField {
    /// All updatable product columns, in menu order.
    pub const ALL: [Self; 2] = [Self::NumberOfUnits, Self::PricePerUnit];

    /// Column name as it appears in the schema.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::NumberOfUnits => "numberOfUnits",
            Self::PricePerUnit => "pricePerUnit",
        }
    }

    /// Parse console text into a typed update for this column.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NotANumber` if the value does not parse.
    pub fn parse_value(self, raw: &str) -> Result<ProductFieldUpdate, InputError> {
        match self {
            Self::NumberOfUnits => {
                parse_number("number of units", raw).map(ProductFieldUpdate::NumberOfUnits)
            }
            Self::PricePerUnit => raw.parse().map(ProductFieldUpdate::PricePerUnit),
        }
    }
}

impl ProductFieldUpdate {
    /// The column this update writes.
    #[must_use]
    pub const fn field(&self) -> ProductField {
        match self {
            Self::NumberOfUnits(_) => ProductField::NumberOfUnits,
            Self::PricePerUnit(_) => ProductField::PricePerUnit,
        }
    }
}

impl FromStr for ProductField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numberofunits" | "units" => Ok(Self::NumberOfUnits),
            "priceperunit" | "price" => Ok(Self::PricePerUnit),
            _ => Err(InputError::UnknownColumn {
                entity: "Product",
                column: s.trim().to_owned(),
            }),
        }
    }
}
