//! Booking domain events.

use chrono::{DateTime, Utc};
use common::BookingId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

/// Events a booking raises as it moves through its lifecycle.
///
/// Each event-raising transition queues exactly one of these on the
/// booking; the persistence boundary drains them into the outbox as part
/// of the same commit as the state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BookingEvent {
    /// A new booking was reserved.
    Reserved(BookingReservedData),

    /// The booking was confirmed.
    Confirmed(BookingConfirmedData),

    /// The booking was rejected.
    Rejected(BookingRejectedData),

    /// The booking was cancelled before the stay started.
    Cancelled(BookingCancelledData),

    /// The stay ended and the booking completed.
    Completed(BookingCompletedData),
}

impl DomainEvent for BookingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BookingEvent::Reserved(_) => "BookingReserved",
            BookingEvent::Confirmed(_) => "BookingConfirmed",
            BookingEvent::Rejected(_) => "BookingRejected",
            BookingEvent::Cancelled(_) => "BookingCancelled",
            BookingEvent::Completed(_) => "BookingCompleted",
        }
    }
}

/// Data for a BookingReserved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReservedData {
    /// The booking that was reserved.
    pub booking_id: BookingId,

    /// When the reservation happened.
    pub occurred_at: DateTime<Utc>,
}

/// Data for a BookingConfirmed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmedData {
    pub booking_id: BookingId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for a BookingRejected event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRejectedData {
    pub booking_id: BookingId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for a BookingCancelled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelledData {
    pub booking_id: BookingId,
    pub occurred_at: DateTime<Utc>,
}

/// Data for a BookingCompleted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCompletedData {
    pub booking_id: BookingId,
    pub occurred_at: DateTime<Utc>,
}

impl BookingEvent {
    /// Creates a BookingReserved event.
    pub fn reserved(booking_id: BookingId, occurred_at: DateTime<Utc>) -> Self {
        BookingEvent::Reserved(BookingReservedData {
            booking_id,
            occurred_at,
        })
    }

    /// Creates a BookingConfirmed event.
    pub fn confirmed(booking_id: BookingId, occurred_at: DateTime<Utc>) -> Self {
        BookingEvent::Confirmed(BookingConfirmedData {
            booking_id,
            occurred_at,
        })
    }

    /// Creates a BookingRejected event.
    pub fn rejected(booking_id: BookingId, occurred_at: DateTime<Utc>) -> Self {
        BookingEvent::Rejected(BookingRejectedData {
            booking_id,
            occurred_at,
        })
    }

    /// Creates a BookingCancelled event.
    pub fn cancelled(booking_id: BookingId, occurred_at: DateTime<Utc>) -> Self {
        BookingEvent::Cancelled(BookingCancelledData {
            booking_id,
            occurred_at,
        })
    }

    /// Creates a BookingCompleted event.
    pub fn completed(booking_id: BookingId, occurred_at: DateTime<Utc>) -> Self {
        BookingEvent::Completed(BookingCompletedData {
            booking_id,
            occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types() {
        let id = BookingId::new();
        let now = Utc::now();

        assert_eq!(
            BookingEvent::reserved(id, now).event_type(),
            "BookingReserved"
        );
        assert_eq!(
            BookingEvent::confirmed(id, now).event_type(),
            "BookingConfirmed"
        );
        assert_eq!(
            BookingEvent::rejected(id, now).event_type(),
            "BookingRejected"
        );
        assert_eq!(
            BookingEvent::cancelled(id, now).event_type(),
            "BookingCancelled"
        );
        assert_eq!(
            BookingEvent::completed(id, now).event_type(),
            "BookingCompleted"
        );
    }

    #[test]
    fn event_serialization_round_trips() {
        let id = BookingId::new();
        let event = BookingEvent::reserved(id, Utc::now());

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Reserved"));

        let back: BookingEvent = serde_json::from_str(&json).unwrap();
        match back {
            BookingEvent::Reserved(data) => assert_eq!(data.booking_id, id),
            other => panic!("expected Reserved, got {other:?}"),
        }
    }
}
