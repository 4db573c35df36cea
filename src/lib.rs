// SPDX-License-Identifier: MIT

//! Chirper: a small social-posting service backend.
//!
//! Users register, log in, and post short "chirps"; a payment webhook can
//! upgrade an account. All state lives in a single JSON file managed by
//! [`db::Store`].

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use middleware::metrics::HitCounter;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
    pub hits: HitCounter,
}
