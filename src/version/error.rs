use thiserror::Error;

/// The persistence layer rejected a write
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage quota exceeded writing {key}: {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: u64,
        limit: u64,
    },

    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// The release request did not produce a usable response
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{status} - {reason}")]
    Status { status: u16, reason: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to fetch {endpoint}: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: FetchError,
    },

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
