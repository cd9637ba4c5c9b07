mod memory;
mod postgres;

pub use memory::InMemoryWaitlistStore;
pub use postgres::PgWaitlistStore;

use async_trait::async_trait;

use crate::domain::{WaitlistEmail, WaitlistEntry};

/// Storage backend for waitlist entries
///
/// Every implementation must enforce uniqueness on the normalized email and
/// report a violation as [`StoreError::Duplicate`], so that two concurrent
/// signups for the same address cannot both succeed.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Look up an entry by its normalized email
    async fn find_by_email(
        &self,
        email: &WaitlistEmail,
    ) -> Result<Option<WaitlistEntry>, StoreError>;

    /// Persist a new entry, minting its id and creation timestamp
    async fn insert(&self, email: &WaitlistEmail) -> Result<WaitlistEntry, StoreError>;

    /// Count all persisted entries
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("an entry with the same email is already stored")]
    Duplicate,
    #[error("the store is unavailable")]
    Unavailable(#[source] anyhow::Error),
}
