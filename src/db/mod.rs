// SPDX-License-Identifier: MIT

//! Persistent data store.
//!
//! A single-file, JSON-serialized database holding every entity the
//! service knows about. See [`store::Store`] for the operations and the
//! concurrency discipline.

mod store;

pub use store::{ChirpFilter, SortOrder, Store, StoreError, REFRESH_TOKEN_TTL_DAYS};
