//! Error type shared by every repository implementation.

use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Failures surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not check a connection out of the pool.
    #[error("Database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A NOT NULL constraint fired; the intake row lacks a required column.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),
    /// The requested record does not exist.
    #[error("Record not found")]
    NotFound,
    /// A stored value failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Any other Diesel failure.
    #[error("Database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
                Self::MissingRequiredField(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
