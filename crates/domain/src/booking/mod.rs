//! Booking aggregate, apartment aggregate, and the reservation workflow.

mod aggregate;
mod apartment;
mod commands;
mod events;
mod pricing;
mod service;
mod state;
mod value_objects;

pub use aggregate::Booking;
pub use apartment::Apartment;
pub use commands::{
    CancelBooking, CompleteBooking, ConfirmBooking, CreateApartment, RejectBooking, ReserveBooking,
};
pub use events::{
    BookingCancelledData, BookingCompletedData, BookingConfirmedData, BookingEvent,
    BookingRejectedData, BookingReservedData,
};
pub use pricing::{AdditivePricing, PricingPolicy};
pub use service::BookingService;
pub use state::BookingStatus;
pub use value_objects::{Address, Amenity, Currency, DateRange, Money, PriceBreakdown};

use chrono::NaiveDate;
use common::ApartmentId;
use thiserror::Error;

/// Errors that can occur during booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The requested date range is unusable.
    #[error("invalid date range {start}..{end}: {reason}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: &'static str,
    },

    /// Arithmetic or breakdown construction across differing currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: Currency, right: Currency },

    /// The currency code is outside the known set.
    #[error("invalid currency code: {code:?}")]
    InvalidCurrencyCode { code: String },

    /// The booking is not in a state that allows the attempted transition.
    #[error("invalid booking status transition: cannot {action} from {current} status")]
    InvalidStatusTransition {
        current: BookingStatus,
        action: &'static str,
    },

    /// An active booking on this apartment overlaps the requested range.
    #[error("apartment {apartment_id} is already booked for an overlapping range")]
    Overlap { apartment_id: ApartmentId },
}
