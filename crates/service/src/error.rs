//! Error taxonomy for marketplace operations.
//!
//! Every operation returns [`WorkflowError`]. The console prints the error
//! and returns to the menu; only [`WorkflowError::ConnectionFailure`] ends
//! the process.

use thiserror::Error;

use marketplace_core::{InputError, UserRole};

use crate::db::RepositoryError;

/// Convenient result alias for marketplace operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Failure of a marketplace operation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The database connection could not be established.
    #[error("could not connect to the database: {0}")]
    ConnectionFailure(#[source] sqlx::Error),

    /// A statement failed against the database.
    #[error("data access failed: {0}")]
    DataAccess(#[source] RepositoryError),

    /// Console input did not parse or failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The acting user does not hold the role the operation requires.
    #[error("this operation requires the {required} role")]
    AuthorizationDenied {
        /// Role the operation requires.
        required: UserRole,
    },

    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store is farther than the proximity threshold.
    #[error("store is {distance:.2} miles away, outside the 30 mile delivery range")]
    OutOfRange {
        /// Distance between customer and store.
        distance: f64,
    },

    /// Login failed.
    #[error("invalid name or password")]
    Unauthenticated,
}

impl WorkflowError {
    /// Whether the console should stop after reporting this error.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionFailure(_))
    }
}

impl From<RepositoryError> for WorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("record"),
            other => Self::DataAccess(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let err = WorkflowError::from(RepositoryError::NotFound);
        assert!(matches!(err, WorkflowError::NotFound("record")));
    }

    #[test]
    fn test_repository_corruption_maps_to_data_access() {
        let err = WorkflowError::from(RepositoryError::DataCorruption("bad".into()));
        assert!(matches!(err, WorkflowError::DataAccess(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_out_of_range_message_shows_distance() {
        let err = WorkflowError::OutOfRange { distance: 40.0 };
        assert_eq!(
            err.to_string(),
            "store is 40.00 miles away, outside the 30 mile delivery range"
        );
    }

    #[test]
    fn test_authorization_denied_names_role() {
        let err = WorkflowError::AuthorizationDenied {
            required: UserRole::Manager,
        };
        assert_eq!(err.to_string(), "this operation requires the manager role");
    }

    #[test]
    fn test_connection_failure_is_fatal() {
        let err = WorkflowError::ConnectionFailure(sqlx::Error::PoolTimedOut);
        assert!(err.is_fatal());
    }
}
