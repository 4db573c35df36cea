//! Chirp model for storage and API.

use serde::{Deserialize, Serialize};

/// A short text post authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chirp {
    /// Sequential numeric id, independent from the user id sequence
    pub id: u64,
    /// Post text, at most 140 characters after profanity filtering
    pub body: String,
    /// Id of the authoring user
    pub author_id: u64,
}
