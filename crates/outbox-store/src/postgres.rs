use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    AggregateRecord, EventId, EventRecord, Result, StoreError, UnitOfWork, Version,
    store::{OutboxStore, validate_unit},
};

/// PostgreSQL-backed store implementation.
///
/// State writes and outbox inserts for one unit of work run inside a single
/// SQL transaction; the version check is a conditional `UPDATE ... WHERE
/// version = $expected` (or an insert-if-absent for new aggregates), so a
/// lost race surfaces as zero affected rows and the transaction rolls back.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_record(row: PgRow) -> Result<AggregateRecord> {
        Ok(AggregateRecord {
            aggregate_type: row.try_get("aggregate_type")?,
            aggregate_id: row.try_get::<Uuid, _>("aggregate_id")?,
            owner_id: row.try_get::<Option<Uuid>, _>("owner_id")?,
            version: Version::new(row.try_get("version")?),
            state: row.try_get("state")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl OutboxStore for PostgresStore {
    async fn load(
        &self,
        aggregate_type: &str,
        aggregate_id: Uuid,
    ) -> Result<Option<AggregateRecord>> {
        let row = sqlx::query(
            r#"
            SELECT aggregate_type, aggregate_id, owner_id, version, state, updated_at
            FROM aggregates
            WHERE aggregate_type = $1 AND aggregate_id = $2
            "#,
        )
        .bind(aggregate_type)
        .bind(aggregate_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn load_owned(
        &self,
        aggregate_type: &str,
        owner_id: Uuid,
    ) -> Result<Vec<AggregateRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT aggregate_type, aggregate_id, owner_id, version, state, updated_at
            FROM aggregates
            WHERE aggregate_type = $1 AND owner_id = $2
            ORDER BY updated_at ASC
            "#,
        )
        .bind(aggregate_type)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn commit(&self, unit: UnitOfWork) -> Result<()> {
        validate_unit(&unit)?;

        let (writes, events) = unit.into_parts();
        tracing::debug!(
            writes = writes.len(),
            events = events.len(),
            "committing unit of work"
        );

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for write in &writes {
            let affected = if write.expected_version == Version::initial() {
                sqlx::query(
                    r#"
                    INSERT INTO aggregates (aggregate_type, aggregate_id, owner_id, version, state, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (aggregate_type, aggregate_id) DO NOTHING
                    "#,
                )
                .bind(&write.aggregate_type)
                .bind(write.aggregate_id)
                .bind(write.owner_id)
                .bind(write.expected_version.next().as_i64())
                .bind(&write.state)
                .bind(now)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            } else {
                sqlx::query(
                    r#"
                    UPDATE aggregates
                    SET version = $4, state = $5, updated_at = $6
                    WHERE aggregate_type = $1 AND aggregate_id = $2 AND version = $3
                    "#,
                )
                .bind(&write.aggregate_type)
                .bind(write.aggregate_id)
                .bind(write.expected_version.as_i64())
                .bind(write.expected_version.next().as_i64())
                .bind(&write.state)
                .bind(now)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            };

            if affected == 0 {
                // Someone else moved the row; report what is actually stored.
                let actual: Option<i64> = sqlx::query_scalar(
                    "SELECT version FROM aggregates WHERE aggregate_type = $1 AND aggregate_id = $2",
                )
                .bind(&write.aggregate_type)
                .bind(write.aggregate_id)
                .fetch_optional(&mut *tx)
                .await?;

                return Err(StoreError::ConcurrencyConflict {
                    aggregate_id: write.aggregate_id,
                    expected: write.expected_version,
                    actual: Version::new(actual.unwrap_or(0)),
                });
            }
        }

        for event in &events {
            sqlx::query(
                r#"
                INSERT INTO outbox (id, event_type, aggregate_type, aggregate_id, occurred_at, payload)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(event.event_id.as_uuid())
            .bind(&event.event_type)
            .bind(&event.aggregate_type)
            .bind(event.aggregate_id)
            .bind(event.occurred_at)
            .bind(&event.payload)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn outbox_events(&self) -> Result<Vec<EventRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_type, aggregate_type, aggregate_id, occurred_at, payload
            FROM outbox
            ORDER BY occurred_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(EventRecord {
                    event_id: EventId::from_uuid(row.try_get::<Uuid, _>("id")?),
                    event_type: row.try_get("event_type")?,
                    aggregate_type: row.try_get("aggregate_type")?,
                    aggregate_id: row.try_get::<Uuid, _>("aggregate_id")?,
                    occurred_at: row.try_get::<DateTime<Utc>, _>("occurred_at")?,
                    payload: row.try_get("payload")?,
                })
            })
            .collect()
    }
}
