// SPDX-License-Identifier: MIT

//! Data models for stored entities.

pub mod chirp;
pub mod token;
pub mod user;

pub use chirp::Chirp;
pub use token::RefreshToken;
pub use user::User;
