//! User domain types.

use marketplace_core::{Coordinates, Tabular, UserId, UserRole};

/// A marketplace user.
///
/// The password column is never loaded into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Stored location, if both coordinates are set.
    pub location: Option<Coordinates>,
    /// Role from the `type` column.
    pub role: UserRole,
}

/// Input for registering a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub location: Coordinates,
    pub role: UserRole,
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] = &["userID", "name", "latitude", "longitude", "type"];

    fn cells(&self) -> Vec<String> {
        let (lat, lon) = self.location.map_or_else(
            || (String::new(), String::new()),
            |c| (c.latitude.to_string(), c.longitude.to_string()),
        );
        vec![
            self.id.to_string(),
            self.name.clone(),
            lat,
            lon,
            self.role.to_string(),
        ]
    }
}
