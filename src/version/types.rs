//! Request and payload types shared by the cache and the fetcher

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::version::error::StoreError;

/// Describes a single resolution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionQuery {
    /// Cache key, one per tracked element
    pub key: String,
    /// Release listing endpoint
    pub endpoint: String,
}

impl VersionQuery {
    pub fn new(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Release listing returned by the remote API, newest release first.
///
/// Records are kept as raw JSON so the cached payload is exactly what the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedVersion(pub Vec<Value>);

impl ResolvedVersion {
    pub fn new(records: Vec<Value>) -> Self {
        Self(records)
    }

    /// Name of the first record, which the API lists as the latest release
    pub fn latest_name(&self) -> Option<&str> {
        self.0.first()?.get("name")?.as_str()
    }

    pub fn records(&self) -> &[Value] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where a resolved payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

/// Outcome of a successful resolution
#[derive(Debug)]
pub struct Resolution {
    pub payload: ResolvedVersion,
    pub origin: Origin,
    /// Set when the fetched payload could not be persisted
    pub persist_warning: Option<StoreError>,
}
