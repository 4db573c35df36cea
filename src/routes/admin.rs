// SPDX-License-Identifier: MIT

//! Admin metrics page and counter reset.

use crate::AppState;
use axum::{extract::State, response::Html};
use std::sync::Arc;

/// Hit-count page for admins (GET /admin/metrics).
pub async fn metrics(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<html>\n<body>\n<h1>Welcome, Chirpy Admin</h1>\n\
         <p>Chirpy has been visited {} times!</p>\n</body>\n</html>\n",
        state.hits.get()
    ))
}

/// Reset the fileserver hit counter (POST /api/reset).
pub async fn reset(State(state): State<Arc<AppState>>) -> &'static str {
    state.hits.reset();
    tracing::info!("Fileserver hit counter reset");
    "Fileserver hits counter reset to 0"
}
