//! Core aggregate and domain event traits.

use outbox_store::{EventRecord, StagedWrite, UnitOfWork, Version};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Trait for domain events.
///
/// Domain events are immutable facts, named in past tense, raised by an
/// aggregate at the moment of a state transition.
pub trait DomainEvent: Serialize + Send + Sync + Clone {
    /// Returns the event type name, used for outbox records.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates persisted as versioned state.
///
/// An aggregate is a cluster of domain objects whose invariants are enforced
/// as one unit. Its state is serialized whole on commit; the version is the
/// concurrency token checked by the store.
pub trait Aggregate: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// Returns the aggregate type name, used as the storage partition.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identity.
    fn id(&self) -> Uuid;

    /// Returns the version this aggregate was read at.
    fn version(&self) -> Version;

    /// Sets the version. Called after loading a stored record.
    fn set_version(&mut self, version: Version);

    /// Optional partition key: the aggregate this one is owned by.
    fn owner_id(&self) -> Option<Uuid> {
        None
    }
}

/// Trait for aggregates that buffer domain events between a state
/// transition and the commit that persists it.
///
/// The buffer has exactly one consumer: staging for commit drains it, and
/// it is empty at all other times.
pub trait PendingEvents: Aggregate {
    /// The type of events this aggregate raises.
    type Event: DomainEvent;

    /// Returns the events raised since the last drain.
    fn pending_events(&self) -> &[Self::Event];

    /// Drains and returns the pending events, leaving the buffer empty.
    fn take_events(&mut self) -> Vec<Self::Event>;
}

/// Extension methods for staging aggregates into a [`UnitOfWork`].
pub trait UnitOfWorkExt {
    /// Stages an aggregate's state for commit at its read version.
    fn stage_state<A: Aggregate>(&mut self, aggregate: &A) -> Result<(), serde_json::Error>;

    /// Stages an aggregate's state and drains its pending events into
    /// outbox records, one record per event.
    fn stage_with_events<A: PendingEvents>(
        &mut self,
        aggregate: &mut A,
    ) -> Result<(), serde_json::Error>;
}

impl UnitOfWorkExt for UnitOfWork {
    fn stage_state<A: Aggregate>(&mut self, aggregate: &A) -> Result<(), serde_json::Error> {
        let state = serde_json::to_value(aggregate)?;
        let mut write = StagedWrite::new(
            A::aggregate_type(),
            aggregate.id(),
            aggregate.version(),
            state,
        );
        if let Some(owner) = aggregate.owner_id() {
            write = write.owned_by(owner);
        }
        self.stage(write);
        Ok(())
    }

    fn stage_with_events<A: PendingEvents>(
        &mut self,
        aggregate: &mut A,
    ) -> Result<(), serde_json::Error> {
        self.stage_state(aggregate)?;
        for event in aggregate.take_events() {
            let payload = serde_json::to_value(&event)?;
            self.record(EventRecord::new(
                event.event_type(),
                A::aggregate_type(),
                aggregate.id(),
                payload,
            ));
        }
        Ok(())
    }
}
