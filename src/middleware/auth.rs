// SPDX-License-Identifier: MIT

//! JWT authentication extractor and token helpers.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Issuer claim stamped into every access token.
pub const TOKEN_ISSUER: &str = "chirpy";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from a Bearer JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = authorization_credential(&parts.headers).ok_or(AppError::Unauthorized)?;

        let key = DecodingKey::from_secret(&state.config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);

        let token_data =
            decode::<Claims>(token, &key, &validation).map_err(|_| AppError::Unauthorized)?;

        let user_id: u64 = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(AuthUser { user_id })
    }
}

/// Pull the credential out of an `Authorization: <scheme> <credential>`
/// header. Scheme-agnostic: access tokens arrive as `Bearer`, the Polka
/// webhook key as `ApiKey`.
pub fn authorization_credential(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let _scheme = parts.next()?;
    let credential = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(credential)
}

/// Create a signed access token for a user session.
pub fn create_jwt(
    user_id: u64,
    signing_key: &[u8],
    expires_in: chrono::Duration,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now();

    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + expires_in).timestamp() as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
