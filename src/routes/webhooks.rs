// SPDX-License-Identifier: MIT

//! Polka payment webhook.

use crate::error::{AppError, Result};
use crate::middleware::auth::authorization_credential;
use crate::AppState;
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PolkaEvent {
    event: String,
    data: PolkaData,
}

#[derive(Deserialize)]
pub struct PolkaData {
    user_id: u64,
}

/// Handle Polka payment events (POST /api/polka/webhooks).
///
/// Authenticated with the shared `ApiKey` credential. Only
/// `user.upgraded` does anything; other events are acknowledged with 204
/// so Polka stops retrying them.
pub async fn polka(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<PolkaEvent>,
) -> Result<StatusCode> {
    let key = authorization_credential(&headers).ok_or(AppError::Unauthorized)?;
    if key != state.config.polka_key {
        tracing::warn!("Webhook rejected: bad Polka key");
        return Err(AppError::Unauthorized);
    }

    if event.event != "user.upgraded" {
        tracing::debug!(event = %event.event, "Ignoring unhandled Polka event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user = state.db.upgrade_user(event.data.user_id)?;
    tracing::info!(user_id = user.id, "User upgraded to Chirpy Red");

    Ok(StatusCode::NO_CONTENT)
}
