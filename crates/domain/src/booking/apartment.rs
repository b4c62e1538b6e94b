//! Apartment aggregate.

use chrono::{DateTime, Utc};
use common::ApartmentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::Aggregate;
use outbox_store::Version;

use super::{Address, Amenity, BookingError, Money};

/// A rentable apartment.
///
/// Holds the listing data bookings price against: the nightly rate, the
/// cleaning fee, and the amenity set. Bookings reference an apartment by
/// id; the apartment itself carries no booking calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    id: ApartmentId,
    name: String,
    description: String,
    address: Address,
    price_per_night: Money,
    cleaning_fee: Money,
    amenities: Vec<Amenity>,
    last_booked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    version: Version,
}

impl Apartment {
    /// Creates a new apartment listing.
    ///
    /// The nightly rate must carry a real currency; an unset cleaning fee
    /// is allowed and treated as zero at pricing time.
    pub fn new(
        name: String,
        description: String,
        address: Address,
        price_per_night: Money,
        cleaning_fee: Money,
        amenities: Vec<Amenity>,
    ) -> Result<Self, BookingError> {
        if price_per_night.currency().is_none() {
            return Err(BookingError::InvalidCurrencyCode {
                code: price_per_night.currency().code().to_string(),
            });
        }

        Ok(Apartment {
            id: ApartmentId::new(),
            name,
            description,
            address,
            price_per_night,
            cleaning_fee,
            amenities,
            last_booked_at: None,
            version: Version::initial(),
        })
    }

    pub fn apartment_id(&self) -> ApartmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn price_per_night(&self) -> Money {
        self.price_per_night
    }

    pub fn cleaning_fee(&self) -> Money {
        self.cleaning_fee
    }

    pub fn amenities(&self) -> &[Amenity] {
        &self.amenities
    }

    /// When a booking was last reserved against this apartment, if ever.
    pub fn last_booked_at(&self) -> Option<DateTime<Utc>> {
        self.last_booked_at
    }

    /// Records that a booking was reserved against this apartment.
    ///
    /// Called by the reservation factory. Touching the apartment here is
    /// what enlists its version in the reservation commit, making the
    /// apartment row the arbiter for racing reservations.
    pub(crate) fn mark_booked(&mut self, now: DateTime<Utc>) {
        self.last_booked_at = Some(now);
    }
}

impl Aggregate for Apartment {
    fn aggregate_type() -> &'static str {
        "Apartment"
    }

    fn id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::booking::Currency;

    fn test_address() -> Address {
        Address {
            street: "12 Alpine Way".to_string(),
            city: "Innsbruck".to_string(),
            state: "Tyrol".to_string(),
            country: "Austria".to_string(),
            zip_code: "6020".to_string(),
        }
    }

    #[test]
    fn new_apartment_starts_at_initial_version() {
        let apartment = Apartment::new(
            "Alpine Loft".to_string(),
            "Loft with mountain view".to_string(),
            test_address(),
            Money::new(Decimal::from(120), Currency::Eur),
            Money::new(Decimal::from(30), Currency::Eur),
            vec![Amenity::Wifi, Amenity::MountainView],
        )
        .unwrap();

        assert_eq!(apartment.version(), Version::initial());
        assert!(apartment.last_booked_at().is_none());
        assert_eq!(apartment.amenities().len(), 2);
    }

    #[test]
    fn rate_without_currency_is_rejected() {
        let result = Apartment::new(
            "Alpine Loft".to_string(),
            String::new(),
            test_address(),
            Money::none(),
            Money::none(),
            vec![],
        );

        assert!(matches!(
            result,
            Err(BookingError::InvalidCurrencyCode { .. })
        ));
    }

    #[test]
    fn mark_booked_records_the_time() {
        let mut apartment = Apartment::new(
            "Alpine Loft".to_string(),
            String::new(),
            test_address(),
            Money::new(Decimal::from(120), Currency::Eur),
            Money::none(),
            vec![],
        )
        .unwrap();

        let now = Utc::now();
        apartment.mark_booked(now);
        assert_eq!(apartment.last_booked_at(), Some(now));
    }

    #[test]
    fn apartment_state_round_trips() {
        let apartment = Apartment::new(
            "Alpine Loft".to_string(),
            "Loft".to_string(),
            test_address(),
            Money::new(Decimal::from(120), Currency::Eur),
            Money::new(Decimal::from(30), Currency::Eur),
            vec![Amenity::Pool],
        )
        .unwrap();

        let json = serde_json::to_value(&apartment).unwrap();
        let back: Apartment = serde_json::from_value(json).unwrap();
        assert_eq!(back.apartment_id(), apartment.apartment_id());
        assert_eq!(back.price_per_night(), apartment.price_per_night());
    }
}
