// SPDX-License-Identifier: MIT

use chirper::config::Config;
use chirper::db::Store;
use chirper::middleware::metrics::HitCounter;
use chirper::routes::create_router;
use chirper::AppState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_DB_ID: AtomicU64 = AtomicU64::new(0);

/// On-disk database file in the system temp dir, removed on drop.
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    #[allow(dead_code)]
    pub fn new() -> Self {
        let n = NEXT_DB_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "chirper-test-{}-{}.json",
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }

    /// Open a store on this file.
    #[allow(dead_code)]
    pub fn open(&self) -> Store {
        Store::open(&self.path).expect("Failed to open test store")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        let _ = std::fs::remove_file(self.path.with_extension("json.tmp"));
    }
}

/// Create a test app backed by a fresh temp database.
/// Returns the router, the shared state, and the temp file guard.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, TempDb) {
    let tmp = TempDb::new();
    let mut config = Config::test_default();
    config.database_path = tmp.path.display().to_string();
    let db = tmp.open();

    let state = Arc::new(AppState {
        config,
        db,
        hits: HitCounter::default(),
    });

    (create_router(state.clone()), state, tmp)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mint a valid one-hour access token for tests.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: u64, signing_key: &[u8]) -> String {
    chirper::middleware::auth::create_jwt(user_id, signing_key, chrono::Duration::hours(1))
        .expect("Failed to create test JWT")
}
