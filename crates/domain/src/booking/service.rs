//! Booking service providing the reservation workflow.

use std::sync::Arc;

use common::{ApartmentId, BookingId, UserId};
use outbox_store::{OutboxStore, StoreError, UnitOfWork};
use uuid::Uuid;

use crate::aggregate::{Aggregate, UnitOfWorkExt};
use crate::clock::{Clock, SystemClock};
use crate::error::DomainError;
use crate::user::User;

use super::{
    AdditivePricing, Apartment, Booking, BookingError, CancelBooking, CompleteBooking,
    ConfirmBooking, CreateApartment, PricingPolicy, RejectBooking, ReserveBooking,
};

/// Service for managing apartments and bookings.
///
/// Provides a high-level API over the store: each operation loads the
/// aggregates it needs, runs the domain transition, and commits state and
/// events in one unit of work. The clock and pricing policy are injected
/// so tests can pin time and price.
pub struct BookingService<S: OutboxStore> {
    store: S,
    clock: Arc<dyn Clock>,
    pricing: Arc<dyn PricingPolicy>,
}

impl<S: OutboxStore> BookingService<S> {
    /// Creates a new booking service with the given store, using the
    /// system clock and the additive pricing model.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            pricing: Arc::new(AdditivePricing),
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the pricing policy.
    pub fn with_pricing(mut self, pricing: Arc<dyn PricingPolicy>) -> Self {
        self.pricing = pricing;
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new user.
    pub async fn register_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<User, DomainError> {
        let mut user = User::register(name, email, self.clock.utc_now());

        let mut unit = UnitOfWork::new();
        unit.stage_state(&user)?;
        self.store.commit(unit).await?;
        user.set_version(user.version().next());

        metrics::counter!("users_registered_total").increment(1);
        Ok(user)
    }

    /// Lists a new apartment.
    #[tracing::instrument(skip(self, cmd))]
    pub async fn create_apartment(&self, cmd: CreateApartment) -> Result<Apartment, DomainError> {
        let mut apartment = Apartment::new(
            cmd.name,
            cmd.description,
            cmd.address,
            cmd.price_per_night,
            cmd.cleaning_fee,
            cmd.amenities,
        )?;

        let mut unit = UnitOfWork::new();
        unit.stage_state(&apartment)?;
        self.store.commit(unit).await?;
        apartment.set_version(apartment.version().next());

        metrics::counter!("apartments_created_total").increment(1);
        Ok(apartment)
    }

    /// Reserves an apartment for a guest over a date range.
    ///
    /// Checks the requested range against every active booking on the
    /// apartment, prices the stay, and commits the new booking together
    /// with the apartment's bumped version. Two racing reservations both
    /// pass the overlap check against the same snapshot, but only one can
    /// commit the apartment at its expected version; the loser's conflict
    /// surfaces as [`BookingError::Overlap`], same as a plain double
    /// booking.
    #[tracing::instrument(skip(self))]
    pub async fn reserve(&self, cmd: ReserveBooking) -> Result<Booking, DomainError> {
        let ReserveBooking {
            apartment_id,
            user_id,
            period,
        } = cmd;

        self.get_user(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        let mut apartment = self
            .get_apartment(apartment_id)
            .await?
            .ok_or(DomainError::ApartmentNotFound(apartment_id))?;

        for existing in self.bookings_for_apartment(apartment_id).await? {
            if existing.blocks_apartment() && existing.period().overlaps(&period) {
                metrics::counter!("booking_overlaps_total").increment(1);
                return Err(BookingError::Overlap { apartment_id }.into());
            }
        }

        let mut booking = Booking::reserve(
            &mut apartment,
            user_id,
            period,
            self.clock.utc_now(),
            self.pricing.as_ref(),
        )?;

        let mut unit = UnitOfWork::new();
        unit.stage_with_events(&mut booking)?;
        unit.stage_state(&apartment)?;

        match self.store.commit(unit).await {
            Ok(()) => {}
            // A conflict on this path means another reservation touched the
            // apartment between our snapshot and our commit. The caller sees
            // it as an overlap and may retry against fresh state.
            Err(StoreError::ConcurrencyConflict { .. }) => {
                metrics::counter!("booking_conflicts_total").increment(1);
                return Err(BookingError::Overlap { apartment_id }.into());
            }
            Err(e) => return Err(e.into()),
        }
        booking.set_version(booking.version().next());

        metrics::counter!("bookings_reserved_total").increment(1);
        tracing::info!(booking_id = %booking.booking_id(), "booking reserved");
        Ok(booking)
    }

    /// Confirms a reserved booking.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, cmd: ConfirmBooking) -> Result<Booking, DomainError> {
        self.transition(cmd.booking_id, "bookings_confirmed_total", |booking, now| {
            booking.confirm(now)
        })
        .await
    }

    /// Rejects a reserved booking.
    #[tracing::instrument(skip(self))]
    pub async fn reject(&self, cmd: RejectBooking) -> Result<Booking, DomainError> {
        self.transition(cmd.booking_id, "bookings_rejected_total", |booking, now| {
            booking.reject(now)
        })
        .await
    }

    /// Cancels a booking before the stay starts.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, cmd: CancelBooking) -> Result<Booking, DomainError> {
        self.transition(cmd.booking_id, "bookings_cancelled_total", |booking, now| {
            booking.cancel(now)
        })
        .await
    }

    /// Completes a booking once the stay has ended.
    #[tracing::instrument(skip(self))]
    pub async fn complete(&self, cmd: CompleteBooking) -> Result<Booking, DomainError> {
        self.transition(cmd.booking_id, "bookings_completed_total", |booking, now| {
            booking.complete(now)
        })
        .await
    }

    /// Loads a user by ID. Returns None if the user doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        self.load(user_id.as_uuid()).await
    }

    /// Loads an apartment by ID. Returns None if it doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_apartment(
        &self,
        apartment_id: ApartmentId,
    ) -> Result<Option<Apartment>, DomainError> {
        self.load(apartment_id.as_uuid()).await
    }

    /// Loads a booking by ID. Returns None if it doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, DomainError> {
        self.load(booking_id.as_uuid()).await
    }

    /// Loads every booking ever made against an apartment, in all states.
    #[tracing::instrument(skip(self))]
    pub async fn bookings_for_apartment(
        &self,
        apartment_id: ApartmentId,
    ) -> Result<Vec<Booking>, DomainError> {
        let records = self
            .store
            .load_owned(Booking::aggregate_type(), apartment_id.as_uuid())
            .await?;

        let mut bookings = Vec::with_capacity(records.len());
        for record in records {
            let mut booking: Booking = serde_json::from_value(record.state)?;
            booking.set_version(record.version);
            bookings.push(booking);
        }
        Ok(bookings)
    }

    /// Runs one lifecycle transition: load, mutate, commit, bump version.
    async fn transition<F>(
        &self,
        booking_id: BookingId,
        counter: &'static str,
        apply: F,
    ) -> Result<Booking, DomainError>
    where
        F: FnOnce(&mut Booking, chrono::DateTime<chrono::Utc>) -> Result<(), BookingError>,
    {
        let mut booking = self
            .get_booking(booking_id)
            .await?
            .ok_or(DomainError::BookingNotFound(booking_id))?;

        apply(&mut booking, self.clock.utc_now())?;

        let mut unit = UnitOfWork::new();
        unit.stage_with_events(&mut booking)?;
        self.store.commit(unit).await?;
        booking.set_version(booking.version().next());

        metrics::counter!(counter).increment(1);
        Ok(booking)
    }

    async fn load<A: Aggregate>(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        let Some(record) = self.store.load(A::aggregate_type(), id).await? else {
            return Ok(None);
        };
        let mut aggregate: A = serde_json::from_value(record.state)?;
        aggregate.set_version(record.version);
        Ok(Some(aggregate))
    }
}
