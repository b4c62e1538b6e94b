//! Shared identifier types for the booking engine.

mod ids;

pub use ids::{ApartmentId, BookingId, UserId};
