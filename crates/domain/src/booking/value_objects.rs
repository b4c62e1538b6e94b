//! Value objects for the booking domain.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BookingError;

/// A currency from the closed set the engine transacts in.
///
/// `None` is a sentinel for an unset amount. It never comes out of
/// [`Currency::from_code`] and must never appear in a persisted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Sentinel for an unset monetary amount.
    #[default]
    None,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Looks up a currency by its short code.
    ///
    /// Fails with `InvalidCurrencyCode` for anything outside the closed
    /// set, including the empty code of the `None` sentinel.
    pub fn from_code(code: &str) -> Result<Self, BookingError> {
        match code {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(BookingError::InvalidCurrencyCode {
                code: code.to_string(),
            }),
        }
    }

    /// Returns the short code. The `None` sentinel has no code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::None => "",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Returns true for the unset sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Currency::None)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A currency-tagged monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a money amount.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The unset sentinel: zero with no currency.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true for the unset sentinel.
    pub fn is_none(&self) -> bool {
        self.currency.is_none()
    }

    /// Adds another amount. Fails with `CurrencyMismatch` when the
    /// currencies differ.
    pub fn checked_add(&self, other: Money) -> Result<Money, BookingError> {
        if self.currency != other.currency {
            return Err(BookingError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Multiplies by a whole number (e.g. nights).
    pub fn times(&self, factor: i64) -> Money {
        Money {
            amount: self.amount * Decimal::from(factor),
            currency: self.currency,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// A half-open range of calendar dates: the guest arrives on `start` and
/// leaves on `end`, so `end` itself is a free night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a date range. Fails with `InvalidRange` unless `start` is
    /// strictly before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if start >= end {
            return Err(BookingError::InvalidRange {
                start,
                end,
                reason: "start must be before end",
            });
        }
        Ok(Self { start, end })
    }

    /// First night of the stay.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Check-out date; not itself a booked night.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the range.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true iff the two ranges share at least one night.
    ///
    /// Half-open semantics: a range ending on the day another starts does
    /// not overlap it. Symmetric, and a range always overlaps itself.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Postal address of an apartment. Creation-time data, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

impl Address {
    /// Creates an address.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: country.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// Amenities an apartment can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    Wifi,
    AirConditioning,
    Parking,
    PetFriendly,
    Pool,
    Gym,
    Spa,
    Terrace,
    MountainView,
    GardenView,
}

/// The priced components of a stay.
///
/// The total is always the sum of the other three, computed at
/// construction, and all four share one real currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    price_for_period: Money,
    cleaning_fee: Money,
    amenities_up_charge: Money,
    total: Money,
}

impl PriceBreakdown {
    /// Builds a breakdown from its components.
    ///
    /// Fails with `CurrencyMismatch` if the components disagree on
    /// currency, and rejects the unset `None` currency outright.
    pub fn new(
        price_for_period: Money,
        cleaning_fee: Money,
        amenities_up_charge: Money,
    ) -> Result<Self, BookingError> {
        let total = price_for_period
            .checked_add(cleaning_fee)?
            .checked_add(amenities_up_charge)?;
        if total.currency().is_none() {
            return Err(BookingError::InvalidCurrencyCode {
                code: total.currency().code().to_string(),
            });
        }
        Ok(Self {
            price_for_period,
            cleaning_fee,
            amenities_up_charge,
            total,
        })
    }

    /// Nightly rate times nights.
    pub fn price_for_period(&self) -> Money {
        self.price_for_period
    }

    /// Flat cleaning fee.
    pub fn cleaning_fee(&self) -> Money {
        self.cleaning_fee
    }

    /// Sum of amenity surcharges.
    pub fn amenities_up_charge(&self) -> Money {
        self.amenities_up_charge
    }

    /// Sum of the three components.
    pub fn total(&self) -> Money {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usd(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Usd)
    }

    #[test]
    fn currency_from_code_round_trips() {
        assert_eq!(Currency::from_code("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_code("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_code("GBP").unwrap(), Currency::Gbp);
        assert_eq!(Currency::Eur.code(), "EUR");
    }

    #[test]
    fn unknown_currency_code_fails() {
        let result = Currency::from_code("XYZ");
        assert!(matches!(
            result,
            Err(BookingError::InvalidCurrencyCode { code }) if code == "XYZ"
        ));
    }

    #[test]
    fn none_sentinel_has_no_code_and_is_not_lookupable() {
        assert_eq!(Currency::None.code(), "");
        assert!(Currency::from_code("").is_err());
    }

    #[test]
    fn money_addition_same_currency() {
        let sum = usd(100).checked_add(usd(20)).unwrap();
        assert_eq!(sum, usd(120));
    }

    #[test]
    fn money_addition_mismatched_currency_fails() {
        let result = usd(100).checked_add(Money::new(Decimal::from(20), Currency::Eur));
        assert!(matches!(
            result,
            Err(BookingError::CurrencyMismatch {
                left: Currency::Usd,
                right: Currency::Eur,
            })
        ));
    }

    #[test]
    fn money_times_scales_amount() {
        assert_eq!(usd(100).times(3), usd(300));
    }

    #[test]
    fn money_zero_and_none() {
        assert!(Money::zero(Currency::Usd).is_zero());
        assert!(!Money::zero(Currency::Usd).is_none());
        assert!(Money::none().is_none());
        assert!(Money::none().is_zero());
    }

    #[test]
    fn money_display() {
        assert_eq!(usd(100).to_string(), "100 USD");
    }

    #[test]
    fn date_range_requires_start_before_end() {
        assert!(DateRange::new(date(2026, 1, 10), date(2026, 1, 13)).is_ok());
        assert!(matches!(
            DateRange::new(date(2026, 1, 13), date(2026, 1, 13)),
            Err(BookingError::InvalidRange { .. })
        ));
        assert!(DateRange::new(date(2026, 1, 14), date(2026, 1, 13)).is_err());
    }

    #[test]
    fn date_range_nights() {
        let range = DateRange::new(date(2026, 1, 10), date(2026, 1, 13)).unwrap();
        assert_eq!(range.nights(), 3);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = DateRange::new(date(2026, 1, 10), date(2026, 1, 13)).unwrap();
        let b = DateRange::new(date(2026, 1, 12), date(2026, 1, 15)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn range_overlaps_itself() {
        let a = DateRange::new(date(2026, 1, 10), date(2026, 1, 13)).unwrap();
        assert!(a.overlaps(&a));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let a = DateRange::new(date(2026, 1, 10), date(2026, 1, 13)).unwrap();
        let b = DateRange::new(date(2026, 1, 13), date(2026, 1, 16)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        let inner = DateRange::new(date(2026, 1, 10), date(2026, 1, 12)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn price_breakdown_total_is_sum_of_components() {
        let breakdown = PriceBreakdown::new(usd(300), usd(20), usd(15)).unwrap();
        assert_eq!(breakdown.total(), usd(335));
        assert_eq!(breakdown.price_for_period(), usd(300));
        assert_eq!(breakdown.cleaning_fee(), usd(20));
        assert_eq!(breakdown.amenities_up_charge(), usd(15));
    }

    #[test]
    fn price_breakdown_rejects_mixed_currencies() {
        let result = PriceBreakdown::new(
            usd(300),
            Money::new(Decimal::from(20), Currency::Eur),
            usd(0),
        );
        assert!(matches!(result, Err(BookingError::CurrencyMismatch { .. })));
    }

    #[test]
    fn price_breakdown_rejects_unset_currency() {
        let result = PriceBreakdown::new(Money::none(), Money::none(), Money::none());
        assert!(matches!(
            result,
            Err(BookingError::InvalidCurrencyCode { .. })
        ));
    }

    #[test]
    fn money_serialization_round_trips() {
        let money = Money::new(Decimal::new(12345, 2), Currency::Eur);
        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
