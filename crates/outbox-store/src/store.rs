use async_trait::async_trait;
use uuid::Uuid;

use crate::{AggregateRecord, EventRecord, Result, StagedWrite, StoreError};

/// One atomic persistence unit: staged aggregate writes plus the domain
/// events those aggregates raised.
///
/// A unit of work either commits completely or not at all. Every staged
/// write carries the version its aggregate had when read; any mismatch at
/// commit time fails the whole unit with no partial effect.
#[derive(Debug, Default)]
pub struct UnitOfWork {
    writes: Vec<StagedWrite>,
    events: Vec<EventRecord>,
}

impl UnitOfWork {
    /// Creates an empty unit of work.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an aggregate-state write.
    pub fn stage(&mut self, write: StagedWrite) {
        self.writes.push(write);
    }

    /// Adds an event to be recorded durably with the commit.
    pub fn record(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    /// Returns the staged writes.
    pub fn writes(&self) -> &[StagedWrite] {
        &self.writes
    }

    /// Returns the events to be recorded.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Returns true if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.events.is_empty()
    }

    /// Consumes the unit, returning writes and events.
    pub fn into_parts(self) -> (Vec<StagedWrite>, Vec<EventRecord>) {
        (self.writes, self.events)
    }
}

/// Core trait for the persistence boundary.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Loads the current state record of an aggregate.
    ///
    /// Returns None if the aggregate has never been committed.
    async fn load(&self, aggregate_type: &str, aggregate_id: Uuid)
    -> Result<Option<AggregateRecord>>;

    /// Loads all aggregates of a type that belong to an owner.
    async fn load_owned(&self, aggregate_type: &str, owner_id: Uuid)
    -> Result<Vec<AggregateRecord>>;

    /// Commits a unit of work atomically.
    ///
    /// Each staged write is applied only if the stored version equals its
    /// expected version; the write then lands at `expected.next()`. Every
    /// event in the unit is recorded in the outbox exactly once. On any
    /// version mismatch the whole unit fails with
    /// [`StoreError::ConcurrencyConflict`] and nothing is changed.
    async fn commit(&self, unit: UnitOfWork) -> Result<()>;

    /// Returns recorded outbox events, oldest first.
    ///
    /// Downstream dispatch is not this crate's concern; this is the read
    /// side a relay (or a test) uses.
    async fn outbox_events(&self) -> Result<Vec<EventRecord>>;
}

/// Validates a unit of work before committing it.
pub(crate) fn validate_unit(unit: &UnitOfWork) -> Result<()> {
    if unit.writes().is_empty() {
        return Err(StoreError::InvalidUnit {
            message: "unit of work has no staged writes".to_string(),
        });
    }

    for (i, write) in unit.writes().iter().enumerate() {
        let duplicate = unit.writes()[..i]
            .iter()
            .any(|w| w.aggregate_id == write.aggregate_id && w.aggregate_type == write.aggregate_type);
        if duplicate {
            return Err(StoreError::InvalidUnit {
                message: format!(
                    "aggregate {} ({}) staged more than once",
                    write.aggregate_id, write.aggregate_type
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Version;

    fn write(id: Uuid) -> StagedWrite {
        StagedWrite::new("Booking", id, Version::initial(), serde_json::json!({}))
    }

    #[test]
    fn empty_unit_is_rejected() {
        let unit = UnitOfWork::new();
        assert!(matches!(
            validate_unit(&unit),
            Err(StoreError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn duplicate_staging_is_rejected() {
        let id = Uuid::new_v4();
        let mut unit = UnitOfWork::new();
        unit.stage(write(id));
        unit.stage(write(id));
        assert!(matches!(
            validate_unit(&unit),
            Err(StoreError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn distinct_aggregates_are_accepted() {
        let mut unit = UnitOfWork::new();
        unit.stage(write(Uuid::new_v4()));
        unit.stage(write(Uuid::new_v4()));
        assert!(validate_unit(&unit).is_ok());
    }
}
