//! Refresh token model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-side refresh token record.
///
/// The token string itself is an opaque 256-bit random value, hex-encoded
/// by the caller before it reaches the store. Expired records stay on disk
/// until explicitly revoked; expiry is checked lazily at validation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: u64,
}
