// SPDX-License-Identifier: MIT

//! User registration, update, and lookup routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::services::password;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body shared by registration and update.
#[derive(Deserialize)]
pub struct UserParams {
    email: String,
    password: String,
}

/// User representation returned by the API. Never includes the
/// password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Register a new user (POST /api/users).
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(params): Json<UserParams>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if params.email.is_empty() || params.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let hash = password::hash_password(&params.password)?;
    let user = state.db.create_user(&params.email, &hash)?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update the authenticated user's email and password (PUT /api/users).
/// The upgrade flag is untouched.
pub async fn update(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<UserParams>,
) -> Result<Json<UserResponse>> {
    if params.email.is_empty() || params.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let hash = password::hash_password(&params.password)?;
    let updated = state.db.update_user(user.user_id, &params.email, &hash)?;

    Ok(Json(updated.into()))
}

/// List all users, id-ascending (GET /api/users).
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.get_users()?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Point lookup by id (GET /api/users/{id}).
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<UserResponse>> {
    let user = state.db.get_user_by_id(id)?;
    Ok(Json(user.into()))
}
