//! Registration repository: lookup of owning registrations by document URL.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use shortlist_core::{Error, Registration, RegistrationRepository, Result};

/// PostgreSQL registration repository.
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: Pool<Postgres>,
}

impl PgRegistrationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn parse_row(row: &sqlx::postgres::PgRow) -> Registration {
        Registration {
            id: row.get("id"),
            event_id: row.get("event_id"),
            document_url: row.get("document_url"),
        }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    /// Find the registrations whose submitted document URL is in `urls`.
    ///
    /// URLs with no owning registration are simply absent from the result;
    /// the caller decides whether that is an error.
    async fn find_by_document_urls(&self, urls: &[String]) -> Result<Vec<Registration>> {
        if urls.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query(
            "SELECT id, event_id, document_url
             FROM registration
             WHERE document_url = ANY($1)",
        )
        .bind(urls)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(Self::parse_row).collect())
    }
}
