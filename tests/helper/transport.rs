//! Transport and store test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use preupver::version::cache::TimedCache;
use preupver::version::error::FetchError;
use preupver::version::fetcher::CachedFetcher;
use preupver::version::stores::SqliteStore;
use preupver::version::transport::Transport;

/// Transport returning canned bodies per endpoint and counting calls
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Result<String, u16>>,
    calls: AtomicUsize,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, endpoint: &str, body: &str) -> Self {
        self.responses
            .insert(endpoint.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_status(mut self, endpoint: &str, status: u16) -> Self {
        self.responses.insert(endpoint.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, endpoint: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(endpoint) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                reason: "Stubbed failure".to_string(),
            }),
            None => Err(FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

/// Create a fetcher over a fresh SQLite database
pub fn create_test_fetcher(
    transport: Arc<StubTransport>,
    quota_bytes: Option<u64>,
) -> (TempDir, CachedFetcher<SqliteStore>) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::new(&db_path, quota_bytes).unwrap();

    (
        temp_dir,
        CachedFetcher::new(TimedCache::new(store), transport),
    )
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
