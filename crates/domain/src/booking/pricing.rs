//! Price computation for a stay.

use rust_decimal::Decimal;

use super::{Amenity, BookingError, Currency, DateRange, Money, PriceBreakdown};

/// Strategy for pricing a stay.
///
/// Pure and side-effect-free: the workflow may evaluate it repeatedly
/// under retry. Implementations beyond the additive default (discount
/// tiers, seasonal rates) can be injected without touching the workflow.
pub trait PricingPolicy: Send + Sync {
    /// Computes the price breakdown for a stay.
    fn price(
        &self,
        nightly_rate: Money,
        period: &DateRange,
        cleaning_fee: Money,
        amenities: &[Amenity],
    ) -> Result<PriceBreakdown, BookingError>;
}

/// The default additive model.
///
/// price-for-period = nightly rate × nights; amenities up-charge = sum of
/// flat per-amenity surcharges; cleaning fee passes through unchanged (an
/// unset fee counts as zero); total = the sum, all in the rate's currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditivePricing;

impl AdditivePricing {
    /// Flat surcharge for one amenity, applied once per stay.
    fn surcharge(amenity: Amenity) -> Decimal {
        match amenity {
            Amenity::Wifi => Decimal::ZERO,
            Amenity::AirConditioning => Decimal::from(15),
            Amenity::Parking => Decimal::from(10),
            Amenity::PetFriendly => Decimal::from(5),
            Amenity::Pool => Decimal::from(25),
            Amenity::Gym => Decimal::from(20),
            Amenity::Spa => Decimal::from(30),
            Amenity::Terrace => Decimal::from(10),
            Amenity::MountainView | Amenity::GardenView => Decimal::from(12),
        }
    }
}

impl PricingPolicy for AdditivePricing {
    fn price(
        &self,
        nightly_rate: Money,
        period: &DateRange,
        cleaning_fee: Money,
        amenities: &[Amenity],
    ) -> Result<PriceBreakdown, BookingError> {
        let currency = nightly_rate.currency();
        if currency.is_none() {
            return Err(BookingError::InvalidCurrencyCode {
                code: currency.code().to_string(),
            });
        }

        let price_for_period = nightly_rate.times(period.nights());

        let cleaning_fee = if cleaning_fee.is_none() {
            Money::zero(currency)
        } else {
            cleaning_fee
        };

        let up_charge: Decimal = amenities.iter().map(|a| Self::surcharge(*a)).sum();
        let amenities_up_charge = Money::new(up_charge, currency);

        PriceBreakdown::new(price_for_period, cleaning_fee, amenities_up_charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn usd(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Usd)
    }

    fn range(start_day: u32, end_day: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 1, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, end_day).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn three_nights_plus_cleaning_fee() {
        let breakdown = AdditivePricing
            .price(usd(100), &range(10, 13), usd(20), &[])
            .unwrap();

        assert_eq!(breakdown.price_for_period(), usd(300));
        assert_eq!(breakdown.cleaning_fee(), usd(20));
        assert!(breakdown.amenities_up_charge().is_zero());
        assert_eq!(breakdown.total(), usd(320));
    }

    #[test]
    fn amenity_surcharges_are_summed() {
        let breakdown = AdditivePricing
            .price(
                usd(100),
                &range(10, 12),
                usd(0),
                &[Amenity::Parking, Amenity::Spa, Amenity::Wifi],
            )
            .unwrap();

        assert_eq!(breakdown.amenities_up_charge(), usd(40));
        assert_eq!(breakdown.total(), usd(240));
    }

    #[test]
    fn unset_cleaning_fee_counts_as_zero() {
        let breakdown = AdditivePricing
            .price(usd(100), &range(10, 11), Money::none(), &[])
            .unwrap();

        assert_eq!(breakdown.cleaning_fee(), Money::zero(Currency::Usd));
        assert_eq!(breakdown.total(), usd(100));
    }

    #[test]
    fn mismatched_cleaning_fee_currency_fails() {
        let fee = Money::new(Decimal::from(20), Currency::Eur);
        let result = AdditivePricing.price(usd(100), &range(10, 13), fee, &[]);
        assert!(matches!(result, Err(BookingError::CurrencyMismatch { .. })));
    }

    #[test]
    fn unset_rate_currency_fails() {
        let result = AdditivePricing.price(Money::none(), &range(10, 13), usd(20), &[]);
        assert!(matches!(
            result,
            Err(BookingError::InvalidCurrencyCode { .. })
        ));
    }
}
