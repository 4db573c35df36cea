// SPDX-License-Identifier: MIT

//! Single-file JSON store with typed CRUD operations.
//!
//! The whole database is one JSON document on disk. Every operation takes
//! the readers-writer lock, reads and parses the full file, works on that
//! in-memory copy, and (for mutations) rewrites the file before releasing
//! the lock. Nothing is cached between calls; the file is the only state.
//! The lock covers the disk I/O as well, so writers are totally ordered
//! and a read never observes a half-applied mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Chirp, RefreshToken, User};

/// Refresh tokens live this long from the moment they are stored.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Errors returned by store operations.
///
/// Compared by variant, never by payload: handlers match on the kind to
/// pick a status code and otherwise propagate untouched.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("email already in use")]
    DuplicateEmail,

    #[error("refresh token expired")]
    ExpiredToken,

    #[error("database file is not a valid document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("database file access failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The persisted aggregate: all collections in one JSON document.
///
/// Integer map keys serialize as JSON object keys ("1", "2", ...), which
/// is the on-disk shape existing data files use.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    chirps: BTreeMap<u64, Chirp>,
    users: BTreeMap<u64, User>,
    refresh_tokens: BTreeMap<String, RefreshToken>,
}

impl Document {
    /// Next id for a collection: one past the current maximum, 1 when empty.
    /// Deleting rows below the maximum never frees their ids.
    fn next_id<V>(collection: &BTreeMap<u64, V>) -> u64 {
        collection.keys().next_back().copied().unwrap_or(0) + 1
    }
}

/// Conjunction of optional chirp predicates; an absent predicate matches all.
#[derive(Debug, Default, Clone)]
pub struct ChirpFilter {
    /// Exact match on the authoring user's id
    pub author_id: Option<u64>,
    /// Case-sensitive substring match on the body
    pub contains: Option<String>,
}

impl ChirpFilter {
    fn matches(&self, chirp: &Chirp) -> bool {
        if let Some(author_id) = self.author_id {
            if chirp.author_id != author_id {
                return false;
            }
        }
        if let Some(needle) = &self.contains {
            if !chirp.body.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Chirp listing order. Only the id is a sort key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Handle to the on-disk database.
///
/// Cheap to share behind an `Arc`; all operations take `&self`. Callers
/// always receive independent copies of stored records, never references
/// into the document.
pub struct Store {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Store {
    /// Open the store at `path`, creating an empty database file if none
    /// exists yet. An existing file is not validated here; corrupt contents
    /// surface as [`StoreError::Serialization`] from the first operation
    /// that touches them.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Store {
            path: path.into(),
            lock: RwLock::new(()),
        };
        store.ensure_exists()?;
        Ok(store)
    }

    /// Create the database file with an empty document if it is missing.
    fn ensure_exists(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Creating new database file");
                write_document(&self.path, &Document::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Read and parse the full document. Caller must hold the lock.
    fn load(&self) -> Result<Document, StoreError> {
        self.ensure_exists()?;
        let bytes = fs::read(&self.path)?;
        let doc = serde_json::from_slice(&bytes)?;
        Ok(doc)
    }

    /// Serialize and rewrite the full document. Caller must hold the
    /// write lock.
    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        write_document(&self.path, doc)
    }

    // ─── User operations ─────────────────────────────────────────

    /// Store a new user with the next sequential id and return it.
    /// The password must already be hashed by the caller.
    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;

        if doc.users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Document::next_id(&doc.users),
            email: email.to_string(),
            password: password_hash.to_string(),
            is_chirpy_red: false,
        };
        doc.users.insert(user.id, user.clone());

        self.save(&doc)?;
        Ok(user)
    }

    /// Replace a user's email and password hash, keeping id and upgrade
    /// status. Fails when the id is unknown or the new email belongs to a
    /// different user.
    pub fn update_user(
        &self,
        id: u64,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;

        if doc.users.values().any(|u| u.id != id && u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = doc
            .users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "user" })?;
        user.email = email.to_string();
        user.password = password_hash.to_string();
        let updated = user.clone();

        self.save(&doc)?;
        Ok(updated)
    }

    /// Flag a user as upgraded. Idempotent: upgrading twice is a no-op
    /// the second time.
    pub fn upgrade_user(&self, id: u64) -> Result<User, StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;

        let user = doc
            .users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "user" })?;
        user.is_chirpy_red = true;
        let upgraded = user.clone();

        self.save(&doc)?;
        Ok(upgraded)
    }

    /// All users, ascending by id. An empty store yields an empty vec.
    pub fn get_users(&self) -> Result<Vec<User>, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;
        Ok(doc.users.into_values().collect())
    }

    pub fn get_user_by_id(&self, id: u64) -> Result<User, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;
        doc.users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "user" })
    }

    /// Case-sensitive exact-match lookup; no normalization.
    pub fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;
        doc.users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "user" })
    }

    // ─── Chirp operations ────────────────────────────────────────

    /// Store a new chirp with the next sequential chirp id and return it.
    /// Body length and content validation happen before this call; the
    /// body and author id are stored verbatim.
    pub fn create_chirp(&self, body: &str, author_id: u64) -> Result<Chirp, StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;

        let chirp = Chirp {
            id: Document::next_id(&doc.chirps),
            body: body.to_string(),
            author_id,
        };
        doc.chirps.insert(chirp.id, chirp.clone());

        self.save(&doc)?;
        Ok(chirp)
    }

    /// Chirps matching `filter`, ordered by id. Nothing matching is an
    /// empty vec, not an error.
    pub fn get_chirps(&self, filter: &ChirpFilter, order: SortOrder) -> Result<Vec<Chirp>, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;

        let mut chirps: Vec<Chirp> = doc
            .chirps
            .into_values()
            .filter(|c| filter.matches(c))
            .collect();
        if order == SortOrder::Descending {
            chirps.reverse();
        }
        Ok(chirps)
    }

    pub fn get_chirp_by_id(&self, id: u64) -> Result<Chirp, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;
        doc.chirps
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "chirp" })
    }

    /// Remove a chirp. Deleting an unknown id is a silent no-op; the
    /// caller checks ownership before invoking this.
    pub fn delete_chirp(&self, id: u64) -> Result<(), StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;
        doc.chirps.remove(&id);
        self.save(&doc)
    }

    // ─── Refresh token operations ────────────────────────────────

    /// Store a caller-generated refresh token for `user_id`, expiring 60
    /// days from now. The store trusts the token to be unique (it comes
    /// from a CSPRNG); inserting the same string again overwrites.
    pub fn create_refresh_token(&self, token: &str, user_id: u64) -> Result<(), StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;

        doc.refresh_tokens.insert(
            token.to_string(),
            RefreshToken {
                token: token.to_string(),
                expires_at: Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS),
                user_id,
            },
        );

        self.save(&doc)
    }

    /// Resolve a refresh token to its user id, rejecting unknown and
    /// expired tokens. Read-only: validation never consumes or rotates.
    pub fn validate_refresh_token(&self, token: &str) -> Result<u64, StoreError> {
        self.validate_refresh_token_at(token, Utc::now())
    }

    /// Like [`Store::validate_refresh_token`] with an explicit clock,
    /// so expiry can be exercised without waiting 60 days.
    pub fn validate_refresh_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let doc = self.load()?;

        let record = doc.refresh_tokens.get(token).ok_or(StoreError::NotFound {
            entity: "refresh token",
        })?;
        if now >= record.expires_at {
            return Err(StoreError::ExpiredToken);
        }
        Ok(record.user_id)
    }

    /// Remove a refresh token. Revoking an unknown token is a no-op;
    /// revocation is terminal, the string is never reactivated.
    pub fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;
        doc.refresh_tokens.remove(token);
        self.save(&doc)
    }
}

/// Serialize `doc` and replace the file at `path`.
///
/// Writes to a sibling temp file and renames it into place so a crash
/// mid-write leaves the previous document intact.
fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(doc)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
