use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    AggregateRecord, EventRecord, Result, StoreError, UnitOfWork, Version,
    store::{OutboxStore, validate_unit},
};

#[derive(Default)]
struct Inner {
    states: HashMap<(String, Uuid), AggregateRecord>,
    outbox: Vec<EventRecord>,
}

/// In-memory store implementation for testing.
///
/// Provides the same commit semantics as the PostgreSQL implementation:
/// version checks and state/outbox writes happen under one write lock, so a
/// unit of work is applied atomically or not at all.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded outbox events.
    pub async fn outbox_len(&self) -> usize {
        self.inner.read().await.outbox.len()
    }

    /// Clears all state and outbox rows.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.states.clear();
        inner.outbox.clear();
    }
}

#[async_trait]
impl OutboxStore for InMemoryStore {
    async fn load(
        &self,
        aggregate_type: &str,
        aggregate_id: Uuid,
    ) -> Result<Option<AggregateRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .states
            .get(&(aggregate_type.to_string(), aggregate_id))
            .cloned())
    }

    async fn load_owned(
        &self,
        aggregate_type: &str,
        owner_id: Uuid,
    ) -> Result<Vec<AggregateRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<_> = inner
            .states
            .values()
            .filter(|r| r.aggregate_type == aggregate_type && r.owner_id == Some(owner_id))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.updated_at);
        Ok(records)
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<()> {
        validate_unit(&unit)?;

        let mut inner = self.inner.write().await;

        // Validate every expected version before touching anything.
        for write in unit.writes() {
            let key = (write.aggregate_type.clone(), write.aggregate_id);
            let actual = inner
                .states
                .get(&key)
                .map(|r| r.version)
                .unwrap_or(Version::initial());
            if actual != write.expected_version {
                return Err(StoreError::ConcurrencyConflict {
                    aggregate_id: write.aggregate_id,
                    expected: write.expected_version,
                    actual,
                });
            }
        }

        let (writes, events) = unit.into_parts();
        tracing::debug!(
            writes = writes.len(),
            events = events.len(),
            "committing unit of work"
        );

        let now = Utc::now();
        for write in writes {
            let record = AggregateRecord {
                aggregate_type: write.aggregate_type.clone(),
                aggregate_id: write.aggregate_id,
                owner_id: write.owner_id,
                version: write.expected_version.next(),
                state: write.state,
                updated_at: now,
            };
            inner
                .states
                .insert((write.aggregate_type, write.aggregate_id), record);
        }
        inner.outbox.extend(events);

        Ok(())
    }

    async fn outbox_events(&self) -> Result<Vec<EventRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.outbox.clone())
    }
}
