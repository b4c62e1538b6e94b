//! Booking aggregate and its lifecycle transitions.

use chrono::{DateTime, Utc};
use common::{ApartmentId, BookingId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{Aggregate, PendingEvents};
use outbox_store::Version;

use super::{
    Apartment, BookingError, BookingEvent, BookingStatus, DateRange, PriceBreakdown, PricingPolicy,
};

/// A reservation of one apartment for one guest over one date range.
///
/// Bookings are only created through [`Booking::reserve`], which prices
/// the stay and puts the booking in `Reserved`. Every later transition is
/// a method that checks the status machine and the clock, then mutates
/// state and queues exactly one domain event. The queued events are
/// drained once, at staging time, so a booking that never commits emits
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    apartment_id: ApartmentId,
    user_id: UserId,
    period: DateRange,
    price: PriceBreakdown,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    version: Version,
    #[serde(skip)]
    pending_events: Vec<BookingEvent>,
}

impl Booking {
    /// Reserves the apartment for the given period.
    ///
    /// Prices the stay with the injected policy, rejects periods that
    /// start before today, and marks the apartment as booked so the
    /// reservation commit carries the apartment's version. The overlap
    /// check against sibling bookings lives in the workflow; this factory
    /// only enforces the booking's own invariants.
    pub fn reserve(
        apartment: &mut Apartment,
        user_id: UserId,
        period: DateRange,
        now: DateTime<Utc>,
        pricing: &dyn PricingPolicy,
    ) -> Result<Booking, BookingError> {
        if period.start() < now.date_naive() {
            return Err(BookingError::InvalidRange {
                start: period.start(),
                end: period.end(),
                reason: "must not start in the past",
            });
        }

        let price = pricing.price(
            apartment.price_per_night(),
            &period,
            apartment.cleaning_fee(),
            apartment.amenities(),
        )?;

        apartment.mark_booked(now);

        let id = BookingId::new();
        Ok(Booking {
            id,
            apartment_id: apartment.apartment_id(),
            user_id,
            period,
            price,
            status: BookingStatus::Reserved,
            created_at: now,
            confirmed_at: None,
            rejected_at: None,
            cancelled_at: None,
            completed_at: None,
            version: Version::initial(),
            pending_events: vec![BookingEvent::reserved(id, now)],
        })
    }

    /// Confirms a reserved booking. Only possible before the stay starts.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if !self.status.can_confirm() || now.date_naive() >= self.period.start() {
            return Err(BookingError::InvalidStatusTransition {
                current: self.status,
                action: "confirm",
            });
        }
        self.status = BookingStatus::Confirmed;
        self.confirmed_at = Some(now);
        self.pending_events.push(BookingEvent::confirmed(self.id, now));
        Ok(())
    }

    /// Rejects a reserved booking, freeing its range immediately.
    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if !self.status.can_reject() {
            return Err(BookingError::InvalidStatusTransition {
                current: self.status,
                action: "reject",
            });
        }
        self.status = BookingStatus::Rejected;
        self.rejected_at = Some(now);
        self.pending_events.push(BookingEvent::rejected(self.id, now));
        Ok(())
    }

    /// Cancels a reserved or confirmed booking before the stay starts.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if !self.status.can_cancel() || now.date_naive() >= self.period.start() {
            return Err(BookingError::InvalidStatusTransition {
                current: self.status,
                action: "cancel",
            });
        }
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.pending_events.push(BookingEvent::cancelled(self.id, now));
        Ok(())
    }

    /// Completes a confirmed booking once the stay has ended.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), BookingError> {
        if !self.status.can_complete() || now.date_naive() < self.period.end() {
            return Err(BookingError::InvalidStatusTransition {
                current: self.status,
                action: "complete",
            });
        }
        self.status = BookingStatus::Completed;
        self.completed_at = Some(now);
        self.pending_events.push(BookingEvent::completed(self.id, now));
        Ok(())
    }

    pub fn booking_id(&self) -> BookingId {
        self.id
    }

    pub fn apartment_id(&self) -> ApartmentId {
        self.apartment_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn period(&self) -> &DateRange {
        &self.period
    }

    pub fn price(&self) -> &PriceBreakdown {
        &self.price
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn rejected_at(&self) -> Option<DateTime<Utc>> {
        self.rejected_at
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns true if this booking currently blocks its apartment's
    /// dates.
    pub fn blocks_apartment(&self) -> bool {
        self.status.blocks_apartment()
    }
}

impl Aggregate for Booking {
    fn aggregate_type() -> &'static str {
        "Booking"
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

    // Bookings are partitioned by apartment so the overlap check can load
    // all of an apartment's bookings in one query.
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.apartment_id.as_uuid())
    }
}

impl PendingEvents for Booking {
    type Event = BookingEvent;

    fn pending_events(&self) -> &[BookingEvent] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<BookingEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
