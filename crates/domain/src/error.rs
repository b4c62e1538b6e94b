//! Domain error types.

use common::{ApartmentId, BookingId, UserId};
use outbox_store::StoreError;
use thiserror::Error;

use crate::booking::BookingError;

/// Errors that can occur during workflow operations.
///
/// Everything here is an expected, caller-recoverable outcome. The only
/// local recovery the workflow performs is translating a commit-time
/// concurrency conflict into [`BookingError::Overlap`] on the reservation
/// path; every other store failure passes through unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A booking rule was violated.
    #[error("booking error: {0}")]
    Booking(#[from] BookingError),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced apartment does not exist.
    #[error("apartment not found: {0}")]
    ApartmentNotFound(ApartmentId),

    /// The referenced booking does not exist.
    #[error("booking not found: {0}")]
    BookingNotFound(BookingId),

    /// An error occurred in the store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
