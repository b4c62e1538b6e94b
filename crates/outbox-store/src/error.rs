use thiserror::Error;
use uuid::Uuid;

use crate::Version;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The expected version of a staged aggregate did not match the stored
    /// version. The whole unit of work was rolled back.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        aggregate_id: Uuid,
        expected: Version,
        actual: Version,
    },

    /// The unit of work was malformed (empty, or staging the same aggregate
    /// twice).
    #[error("invalid unit of work: {message}")]
    InvalidUnit { message: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
