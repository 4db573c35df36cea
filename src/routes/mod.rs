// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod users;
pub mod webhooks;

use crate::middleware::metrics;
use crate::AppState;
use axum::{middleware::from_fn_with_state, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Health check response
async fn healthz() -> &'static str {
    "OK\n"
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Static file server under /app, with every hit counted
    let fileserver = Router::new()
        .fallback_service(ServeDir::new(&state.config.app_root))
        .layer(from_fn_with_state(state.clone(), metrics::count_hits));

    Router::new()
        .route("/api/healthz", get(healthz))
        .route(
            "/api/users",
            post(users::create).put(users::update).get(users::list),
        )
        .route("/api/users/{id}", get(users::get_by_id))
        .route("/api/login", post(auth::login))
        .route("/api/refresh", post(auth::refresh))
        .route("/api/revoke", post(auth::revoke))
        .route("/api/chirps", post(chirps::create).get(chirps::list))
        .route(
            "/api/chirps/{id}",
            get(chirps::get_by_id).delete(chirps::delete),
        )
        .route("/api/polka/webhooks", post(webhooks::polka))
        .route("/api/reset", post(admin::reset))
        .route("/admin/metrics", get(admin::metrics))
        .nest("/app", fileserver)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
