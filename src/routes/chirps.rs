// SPDX-License-Identifier: MIT

//! Chirp creation, listing, and deletion routes.

use crate::db::{ChirpFilter, SortOrder};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Chirp;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const MAX_CHIRP_LEN: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replace profane words with asterisks. Matching is whole-word and
/// case-insensitive; words touching punctuation pass through unchanged.
fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Deserialize)]
pub struct ChirpParams {
    body: String,
}

/// Post a chirp as the authenticated user (POST /api/chirps).
pub async fn create(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<ChirpParams>,
) -> Result<(StatusCode, Json<Chirp>)> {
    if params.body.chars().count() > MAX_CHIRP_LEN {
        return Err(AppError::BadRequest("Chirp is too long".to_string()));
    }

    let cleaned = clean_body(&params.body);
    let chirp = state.db.create_chirp(&cleaned, user.user_id)?;

    tracing::info!(chirp_id = chirp.id, author_id = chirp.author_id, "Chirp created");
    Ok((StatusCode::CREATED, Json(chirp)))
}

#[derive(Deserialize)]
pub struct ListParams {
    author_id: Option<u64>,
    contains: Option<String>,
    /// "desc" for newest-first; anything else lists oldest-first
    sort: Option<String>,
}

/// List chirps with optional filtering and ordering (GET /api/chirps).
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Chirp>>> {
    let filter = ChirpFilter {
        author_id: params.author_id,
        contains: params.contains,
    };
    let order = if params.sort.as_deref() == Some("desc") {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };

    let chirps = state.db.get_chirps(&filter, order)?;
    Ok(Json(chirps))
}

/// Point lookup by id (GET /api/chirps/{id}).
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Chirp>> {
    let chirp = state.db.get_chirp_by_id(id)?;
    Ok(Json(chirp))
}

/// Delete one of the authenticated user's own chirps
/// (DELETE /api/chirps/{id}). Deleting someone else's chirp is 403.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    let chirp = state.db.get_chirp_by_id(id)?;
    if chirp.author_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    state.db.delete_chirp(id)?;
    Ok(StatusCode::NO_CONTENT)
}
