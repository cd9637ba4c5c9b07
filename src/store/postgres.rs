use std::time;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{StoreError, WaitlistStore};
use crate::configuration::DatabaseSettings;
use crate::domain::{WaitlistEmail, WaitlistEntry};

/// Postgres-backed waitlist store
#[derive(Clone)]
pub struct PgWaitlistStore {
    pool: PgPool,
}

impl PgWaitlistStore {
    /// Create a store with a lazy connection pool based on settings
    pub fn connect(config: &DatabaseSettings) -> Self {
        let pool = PgPoolOptions::new()
            .acquire_timeout(time::Duration::from_secs(2))
            .connect_lazy_with(config.connect_options());
        Self { pool }
    }
}

/// Database representation of a waitlist entry
#[derive(sqlx::FromRow)]
struct WaitlistRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
}

impl WaitlistRow {
    /// Convert a row back into a domain entry
    fn into_entry(self) -> Result<WaitlistEntry, StoreError> {
        let email = WaitlistEmail::parse(self.email)
            .map_err(|e| StoreError::Unavailable(anyhow::anyhow!(e)))?;
        Ok(WaitlistEntry {
            id: self.id,
            email,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl WaitlistStore for PgWaitlistStore {
    #[tracing::instrument(name = "Fetching a waitlist entry by email", skip(self, email))]
    async fn find_by_email(
        &self,
        email: &WaitlistEmail,
    ) -> Result<Option<WaitlistEntry>, StoreError> {
        let row = sqlx::query_as::<_, WaitlistRow>(
            r#"
            SELECT id, email, created_at
            FROM waitlist
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(into_store_error)?;

        row.map(WaitlistRow::into_entry).transpose()
    }

    #[tracing::instrument(name = "Saving a new waitlist entry", skip(self, email))]
    async fn insert(&self, email: &WaitlistEmail) -> Result<WaitlistEntry, StoreError> {
        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            email: email.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO waitlist (id, email, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(entry.id)
        .bind(entry.email.as_ref())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(into_store_error)?;

        Ok(entry)
    }

    #[tracing::instrument(name = "Counting waitlist entries", skip(self))]
    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist")
            .fetch_one(&self.pool)
            .await
            .map_err(into_store_error)?;

        // COUNT(*) cannot be negative
        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}

/// Translate a query error, keeping unique violations apart from outages
fn into_store_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Duplicate,
        _ => {
            tracing::error!("Failed to execute query: {e:?}");
            StoreError::Unavailable(e.into())
        }
    }
}
