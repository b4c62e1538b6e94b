//! Persistence boundary for the booking engine.
//!
//! Aggregates are stored as versioned JSON state rows. A [`UnitOfWork`]
//! carries staged state writes together with the domain events they raised,
//! and [`OutboxStore::commit`] applies both atomically: either every write
//! lands and every event is recorded exactly once, or nothing changes and
//! the caller sees a [`StoreError::ConcurrencyConflict`].

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;
pub mod version;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{AggregateRecord, EventRecord, StagedWrite};
pub use store::{OutboxStore, UnitOfWork};
pub use version::{EventId, Version};
