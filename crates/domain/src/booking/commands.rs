//! Booking commands.

use common::{ApartmentId, BookingId, UserId};

use super::{Address, Amenity, DateRange, Money};

/// Command to list a new apartment.
#[derive(Debug, Clone)]
pub struct CreateApartment {
    /// Listing name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Where the apartment is.
    pub address: Address,

    /// Nightly rate.
    pub price_per_night: Money,

    /// Flat cleaning fee; `Money::none()` when the listing has none.
    pub cleaning_fee: Money,

    /// Amenities the apartment offers.
    pub amenities: Vec<Amenity>,
}

impl CreateApartment {
    /// Creates a new CreateApartment command.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        address: Address,
        price_per_night: Money,
        cleaning_fee: Money,
        amenities: Vec<Amenity>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            address,
            price_per_night,
            cleaning_fee,
            amenities,
        }
    }
}

/// Command to reserve an apartment for a guest.
#[derive(Debug, Clone)]
pub struct ReserveBooking {
    /// The apartment to book.
    pub apartment_id: ApartmentId,

    /// The guest booking it.
    pub user_id: UserId,

    /// The requested stay.
    pub period: DateRange,
}

impl ReserveBooking {
    /// Creates a new ReserveBooking command.
    pub fn new(apartment_id: ApartmentId, user_id: UserId, period: DateRange) -> Self {
        Self {
            apartment_id,
            user_id,
            period,
        }
    }
}

/// Command to confirm a reserved booking.
#[derive(Debug, Clone)]
pub struct ConfirmBooking {
    /// The booking to confirm.
    pub booking_id: BookingId,
}

impl ConfirmBooking {
    /// Creates a new ConfirmBooking command.
    pub fn new(booking_id: BookingId) -> Self {
        Self { booking_id }
    }
}

/// Command to reject a reserved booking.
#[derive(Debug, Clone)]
pub struct RejectBooking {
    /// The booking to reject.
    pub booking_id: BookingId,
}

impl RejectBooking {
    /// Creates a new RejectBooking command.
    pub fn new(booking_id: BookingId) -> Self {
        Self { booking_id }
    }
}

/// Command to cancel a booking before the stay starts.
#[derive(Debug, Clone)]
pub struct CancelBooking {
    /// The booking to cancel.
    pub booking_id: BookingId,
}

impl CancelBooking {
    /// Creates a new CancelBooking command.
    pub fn new(booking_id: BookingId) -> Self {
        Self { booking_id }
    }
}

/// Command to complete a booking after checkout.
#[derive(Debug, Clone)]
pub struct CompleteBooking {
    /// The booking to complete.
    pub booking_id: BookingId,
}

impl CompleteBooking {
    /// Creates a new CompleteBooking command.
    pub fn new(booking_id: BookingId) -> Self {
        Self { booking_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn reserve_booking_command_carries_its_fields() {
        let apartment_id = ApartmentId::new();
        let user_id = UserId::new();
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
        )
        .unwrap();

        let cmd = ReserveBooking::new(apartment_id, user_id, period);
        assert_eq!(cmd.apartment_id, apartment_id);
        assert_eq!(cmd.user_id, user_id);
        assert_eq!(cmd.period, period);
    }

    #[test]
    fn lifecycle_commands_carry_the_booking_id() {
        let booking_id = BookingId::new();
        assert_eq!(ConfirmBooking::new(booking_id).booking_id, booking_id);
        assert_eq!(RejectBooking::new(booking_id).booking_id, booking_id);
        assert_eq!(CancelBooking::new(booking_id).booking_id, booking_id);
        assert_eq!(CompleteBooking::new(booking_id).booking_id, booking_id);
    }
}
