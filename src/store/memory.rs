use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{StoreError, WaitlistStore};
use crate::domain::{WaitlistEmail, WaitlistEntry};

/// In-memory waitlist store
///
/// The map is keyed by the normalized email and the existence check happens
/// under the same lock guard as the insert, mirroring the uniqueness
/// constraint the Postgres schema enforces.
#[derive(Debug, Default)]
pub struct InMemoryWaitlistStore {
    entries: Mutex<HashMap<String, WaitlistEntry>>,
}

impl InMemoryWaitlistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistStore for InMemoryWaitlistStore {
    async fn find_by_email(
        &self,
        email: &WaitlistEmail,
    ) -> Result<Option<WaitlistEntry>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(email.as_ref()).cloned())
    }

    async fn insert(&self, email: &WaitlistEmail) -> Result<WaitlistEntry, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(email.as_ref()) {
            return Err(StoreError::Duplicate);
        }

        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        entries.insert(entry.email.as_ref().to_owned(), entry.clone());

        Ok(entry)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.len() as u64)
    }
}
