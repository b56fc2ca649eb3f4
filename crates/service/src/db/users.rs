//! User repository for database operations.
//!
//! Credentials are plaintext and matched by equality. The `name` and `type`
//! columns are `CHAR(n)`, so reads trim the padding.

use sqlx::{PgConnection, PgPool};

use marketplace_core::{UserFieldUpdate, UserId};

use super::{RepositoryError, location, parse_role};
use crate::models::{NewUser, User};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `Users` queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    role: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("user {} has no type", row.user_id))
        })?;

        Ok(Self {
            id: UserId::new(row.user_id),
            name: row.name,
            location: location(row.latitude, row.longitude),
            role: parse_role(&role)?,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the first user matching both name and password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored type is invalid.
    pub async fn find_by_credentials(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT userID AS user_id,
                   TRIM(name) AS name,
                   latitude::float8 AS latitude,
                   longitude::float8 AS longitude,
                   TRIM(type) AS role
            FROM Users
            WHERE name = $1 AND password = $2
            ORDER BY userID
            LIMIT 1
            ",
        )
        .bind(name)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored type is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        fetch_user(&mut *conn, id).await
    }

    /// Insert a new user.
    ///
    /// No uniqueness check is made on the name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO Users (name, password, latitude, longitude, type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING userID
            ",
        )
        .bind(&user.name)
        .bind(&user.password)
        .bind(user.location.latitude)
        .bind(user.location.longitude)
        .bind(user.role.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(UserId::new(id))
    }
}

/// Get a user by ID on an existing connection or transaction.
pub(crate) async fn fetch_user(
    conn: &mut PgConnection,
    id: UserId,
) -> Result<Option<User>, RepositoryError> {
    let row = sqlx::query_as::<_, UserRow>(
        r"
        SELECT userID AS user_id,
               TRIM(name) AS name,
               latitude::float8 AS latitude,
               longitude::float8 AS longitude,
               TRIM(type) AS role
        FROM Users
        WHERE userID = $1
        ",
    )
    .bind(id.as_i32())
    .fetch_optional(conn)
    .await?;

    row.map(User::try_from).transpose()
}

/// Overwrite one column of a user. Returns the number of rows changed.
///
/// The statement is chosen by the update variant; the column name is never
/// taken from input.
pub(crate) async fn update_field(
    conn: &mut PgConnection,
    id: UserId,
    update: &UserFieldUpdate,
) -> Result<u64, RepositoryError> {
    let query = match update {
        UserFieldUpdate::Name(name) => {
            sqlx::query("UPDATE Users SET name = $1 WHERE userID = $2").bind(name.as_str())
        }
        UserFieldUpdate::Password(password) => {
            sqlx::query("UPDATE Users SET password = $1 WHERE userID = $2").bind(password.as_str())
        }
        UserFieldUpdate::Latitude(latitude) => {
            sqlx::query("UPDATE Users SET latitude = $1 WHERE userID = $2").bind(*latitude)
        }
        UserFieldUpdate::Longitude(longitude) => {
            sqlx::query("UPDATE Users SET longitude = $1 WHERE userID = $2").bind(*longitude)
        }
        UserFieldUpdate::Role(role) => {
            sqlx::query("UPDATE Users SET type = $1 WHERE userID = $2").bind(role.as_str())
        }
    };

    let result = query.bind(id.as_i32()).execute(conn).await?;
    Ok(result.rows_affected())
}
