use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a logged-in session, stored server-side under its token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// The ID of the user this session belongs to.
    pub user_id: i32,
    /// The username at login time.
    pub username: String,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session for `user_id` lasting `duration_days`.
    pub fn start(user_id: i32, username: String, duration_days: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            username,
            created_at: now,
            expires_at: now + chrono::Duration::days(duration_days),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
