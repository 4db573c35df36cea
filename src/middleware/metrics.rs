// SPDX-License-Identifier: MIT

//! Fileserver hit counting.

use crate::AppState;
use axum::{extract::{Request, State}, middleware::Next, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe request counter shared through [`AppState`].
#[derive(Debug, Default)]
pub struct HitCounter(AtomicU64);

impl HitCounter {
    /// Increment and return the new count.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Middleware counting every request that reaches the static file server.
pub async fn count_hits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let hits = state.hits.increment();
    tracing::debug!(hits, "Fileserver hit");
    next.run(request).await
}
