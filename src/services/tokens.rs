// SPDX-License-Identifier: MIT

//! Refresh token generation.

use ring::rand::{SecureRandom, SystemRandom};

/// Generate a 256-bit random token, hex-encoded.
///
/// Uniqueness comes from the CSPRNG; the store does not re-check it.
pub fn generate_refresh_token() -> anyhow::Result<String> {
    let mut bytes = [0u8; 32];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("System RNG failure"))?;
    Ok(hex::encode(bytes))
}
