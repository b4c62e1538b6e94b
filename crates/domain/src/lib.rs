//! Domain layer for the booking reservation engine.
//!
//! This crate provides the core domain model:
//! - Aggregate and DomainEvent traits for state-stored entities
//! - Booking and Apartment aggregates with the reservation state machine
//! - PricingPolicy for deterministic stay pricing
//! - BookingService orchestrating the reservation workflow

pub mod aggregate;
pub mod booking;
pub mod clock;
pub mod error;
pub mod user;

pub use aggregate::{Aggregate, DomainEvent, PendingEvents, UnitOfWorkExt};
pub use booking::{
    AdditivePricing, Address, Amenity, Apartment, Booking, BookingError, BookingEvent,
    BookingService, BookingStatus, CancelBooking, CompleteBooking, ConfirmBooking, CreateApartment,
    Currency, DateRange, Money, PriceBreakdown, PricingPolicy, RejectBooking, ReserveBooking,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DomainError;
pub use user::User;
