//! Row types that never leave the store as-is.

use chrono::{DateTime, Utc};
use crewlink_types::UserId;

/// A user row including the password hash, for credential checks.
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}
