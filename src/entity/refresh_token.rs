//! Refresh token entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Number of random bytes in a token (hex-encoded to twice as many chars)
pub const TOKEN_BYTES: usize = 32;

/// Lifetime given to tokens issued at login, in days
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Default lifetime as a `Duration`
pub fn default_refresh_token_ttl() -> Duration {
    Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS)
}

/// An opaque credential that can be exchanged for a new access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: EntityId,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// A token is expired strictly after its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
