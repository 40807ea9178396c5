//! Shortlist repository: last-run-wins persistence per parent event.
//!
//! The replace runs as a single transaction holding a Postgres advisory
//! xact lock keyed on the event id, so concurrent runs for the same event
//! serialize and a crash mid-replace can never leave a half-written
//! shortlist. (The original design issued an unlocked delete followed by a
//! separate insert.)

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};
use uuid::Uuid;

use shortlist_core::{Error, Result, ShortlistEntry, ShortlistRepository};

/// PostgreSQL shortlist repository.
#[derive(Clone)]
pub struct PgShortlistRepository {
    pool: Pool<Postgres>,
}

impl PgShortlistRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn parse_row(row: &sqlx::postgres::PgRow) -> ShortlistEntry {
        ShortlistEntry {
            id: row.get("id"),
            event_id: row.get("event_id"),
            registration_id: row.get("registration_id"),
            rank: row.get("rank"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl ShortlistRepository for PgShortlistRepository {
    async fn replace_for_event(&self, event_id: Uuid, registration_ids: &[Uuid]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::replace_failed(e.to_string()))?;

        // Serializes concurrent replaces for the same event; released on
        // commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(event_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::replace_failed(e.to_string()))?;

        let deleted = sqlx::query("DELETE FROM shortlist WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::replace_failed(e.to_string()))?
            .rows_affected();

        for (rank, registration_id) in registration_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO shortlist (id, event_id, registration_id, rank)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::now_v7())
            .bind(event_id)
            .bind(registration_id)
            .bind(rank as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::replace_failed(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::replace_failed(e.to_string()))?;

        info!(
            event_id = %event_id,
            deleted,
            inserted = registration_ids.len(),
            "Replaced event shortlist"
        );
        Ok(())
    }

    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<ShortlistEntry>> {
        let rows = sqlx::query(
            "SELECT id, event_id, registration_id, rank, created_at
             FROM shortlist
             WHERE event_id = $1
             ORDER BY rank ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(event_id = %event_id, count = rows.len(), "Listed event shortlist");
        Ok(rows.iter().map(Self::parse_row).collect())
    }
}
