use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EventId, Version};

/// A persisted aggregate-state row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// The kind of aggregate (e.g. "Booking", "Apartment").
    pub aggregate_type: String,

    /// The aggregate's identity.
    pub aggregate_id: Uuid,

    /// Optional partition key: the aggregate this one belongs to.
    ///
    /// Bookings are stored with their apartment here so all bookings for an
    /// apartment can be loaded without a full scan.
    pub owner_id: Option<Uuid>,

    /// Stored concurrency token.
    pub version: Version,

    /// The aggregate state as JSON.
    pub state: serde_json::Value,

    /// When this row was last written.
    pub updated_at: DateTime<Utc>,
}

/// A state write staged in a unit of work, not yet committed.
#[derive(Debug, Clone)]
pub struct StagedWrite {
    /// The kind of aggregate being written.
    pub aggregate_type: String,

    /// The aggregate's identity.
    pub aggregate_id: Uuid,

    /// Optional partition key, see [`AggregateRecord::owner_id`].
    pub owner_id: Option<Uuid>,

    /// The version the aggregate had when it was read. Commit fails with a
    /// concurrency conflict if the stored version has moved past this.
    pub expected_version: Version,

    /// The new state to persist.
    pub state: serde_json::Value,
}

impl StagedWrite {
    /// Creates a staged write for an aggregate.
    pub fn new(
        aggregate_type: impl Into<String>,
        aggregate_id: Uuid,
        expected_version: Version,
        state: serde_json::Value,
    ) -> Self {
        Self {
            aggregate_type: aggregate_type.into(),
            aggregate_id,
            owner_id: None,
            expected_version,
            state,
        }
    }

    /// Sets the owner partition key.
    pub fn owned_by(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// A durable outbox row: one domain event recorded as part of a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique identifier for this record.
    pub event_id: EventId,

    /// The event's type name (e.g. "BookingReserved").
    pub event_type: String,

    /// The kind of aggregate that raised the event.
    pub aggregate_type: String,

    /// The aggregate that raised the event.
    pub aggregate_id: Uuid,

    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,

    /// The event payload as JSON.
    pub payload: serde_json::Value,
}

impl EventRecord {
    /// Creates a new event record with a fresh ID, timestamped now.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_type: impl Into<String>,
        aggregate_id: Uuid,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            aggregate_type: aggregate_type.into(),
            aggregate_id,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_write_owned_by_sets_partition_key() {
        let owner = Uuid::new_v4();
        let write = StagedWrite::new(
            "Booking",
            Uuid::new_v4(),
            Version::initial(),
            serde_json::json!({}),
        )
        .owned_by(owner);
        assert_eq!(write.owner_id, Some(owner));
    }

    #[test]
    fn event_record_gets_fresh_id() {
        let id = Uuid::new_v4();
        let a = EventRecord::new("BookingReserved", "Booking", id, serde_json::json!({}));
        let b = EventRecord::new("BookingReserved", "Booking", id, serde_json::json!({}));
        assert_ne!(a.event_id, b.event_id);
    }
}
