// SPDX-License-Identifier: MIT

//! Login and refresh-token routes.

use crate::db::StoreError;
use crate::error::{AppError, Result};
use crate::middleware::auth::{authorization_credential, create_jwt};
use crate::services::{password, tokens};
use crate::AppState;
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest access-token lifetime a client may request.
const MAX_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;

#[derive(Deserialize)]
pub struct LoginParams {
    email: String,
    password: String,
    /// Optional requested access-token lifetime; capped at 24h.
    expires_in_seconds: Option<u64>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: u64,
    pub email: String,
    pub is_chirpy_red: bool,
    /// Short-lived JWT access token
    pub token: String,
    /// Long-lived opaque refresh token
    pub refresh_token: String,
}

/// Exchange credentials for an access token and a refresh token
/// (POST /api/login). Unknown emails and wrong passwords both come back
/// as a plain 401 so the response doesn't reveal which one was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(params): Json<LoginParams>,
) -> Result<Json<LoginResponse>> {
    let user = match state.db.get_user_by_email(&params.email) {
        Ok(user) => user,
        Err(StoreError::NotFound { .. }) => return Err(AppError::Unauthorized),
        Err(err) => return Err(err.into()),
    };

    if !password::verify_password(&params.password, &user.password) {
        return Err(AppError::Unauthorized);
    }

    let lifetime_secs = params
        .expires_in_seconds
        .unwrap_or(MAX_TOKEN_LIFETIME_SECS)
        .min(MAX_TOKEN_LIFETIME_SECS);
    let token = create_jwt(
        user.id,
        &state.config.jwt_secret,
        chrono::Duration::seconds(lifetime_secs as i64),
    )?;

    let refresh_token = tokens::generate_refresh_token()?;
    state.db.create_refresh_token(&refresh_token, user.id)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        is_chirpy_red: user.is_chirpy_red,
        token,
        refresh_token,
    }))
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Exchange a valid refresh token for a fresh one-hour access token
/// (POST /api/refresh). Unknown and expired tokens both map to 401.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>> {
    let refresh_token = authorization_credential(&headers).ok_or(AppError::Unauthorized)?;

    let user_id = match state.db.validate_refresh_token(refresh_token) {
        Ok(user_id) => user_id,
        Err(StoreError::NotFound { .. } | StoreError::ExpiredToken) => {
            return Err(AppError::Unauthorized)
        }
        Err(err) => return Err(err.into()),
    };

    let token = create_jwt(
        user_id,
        &state.config.jwt_secret,
        chrono::Duration::hours(1),
    )?;

    Ok(Json(RefreshResponse { token }))
}

/// Revoke a refresh token (POST /api/revoke). Revoking a token the store
/// has never seen still succeeds with 204.
pub async fn revoke(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<StatusCode> {
    let refresh_token = authorization_credential(&headers).ok_or(AppError::Unauthorized)?;
    state.db.revoke_refresh_token(refresh_token)?;
    Ok(StatusCode::NO_CONTENT)
}
