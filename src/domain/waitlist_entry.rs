use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::WaitlistEmail;

/// Persisted waitlist entry
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: WaitlistEmail,
    pub created_at: DateTime<Utc>,
}
