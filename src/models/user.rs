//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// A registered user as stored in the database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Sequential numeric id, assigned by the store (starts at 1)
    pub id: u64,
    /// Email address, unique across all users (case-sensitive)
    pub email: String,
    /// Password hash (opaque PHC string, never a plaintext password)
    pub password: String,
    /// Whether the user has been upgraded via the payment webhook
    pub is_chirpy_red: bool,
}
