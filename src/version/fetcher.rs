//! Cache-first resolution of release listings

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::version::cache::TimedCache;
use crate::version::error::ResolveError;
use crate::version::store::KeyValueStore;
use crate::version::transport::Transport;
use crate::version::types::{Origin, Resolution, ResolvedVersion, VersionQuery};

/// Resolves release listings, consulting the timed cache before the network.
///
/// Holds no per-call state, so one instance can serve any number of
/// concurrent resolutions. Calls for the same key are not coalesced.
pub struct CachedFetcher<S: KeyValueStore> {
    cache: TimedCache<S>,
    transport: Arc<dyn Transport>,
}

impl<S: KeyValueStore> CachedFetcher<S> {
    pub fn new(cache: TimedCache<S>, transport: Arc<dyn Transport>) -> Self {
        Self { cache, transport }
    }

    pub fn cache(&self) -> &TimedCache<S> {
        &self.cache
    }

    /// Returns the freshest known payload for `query`
    ///
    /// Steps, each run only after the previous one completes:
    /// 1. Return the cached payload if fresh
    /// 2. Fetch the endpoint
    /// 3. Decode the body
    /// 4. Persist the payload; a failure here is reported on the result, not returned
    pub async fn resolve(&self, query: &VersionQuery) -> Result<Resolution, ResolveError> {
        if let Some(payload) = self.cache.read::<ResolvedVersion>(&query.key) {
            debug!("Cache hit for {}", query.key);
            return Ok(Resolution {
                payload,
                origin: Origin::Cache,
                persist_warning: None,
            });
        }

        info!("Cache miss for {}, fetching {}", query.key, query.endpoint);

        let body = self
            .transport
            .get(&query.endpoint)
            .await
            .map_err(|source| ResolveError::Fetch {
                endpoint: query.endpoint.clone(),
                source,
            })?;

        let payload: ResolvedVersion =
            serde_json::from_str(&body).map_err(|source| ResolveError::Decode {
                endpoint: query.endpoint.clone(),
                source,
            })?;

        let persist_warning = self
            .cache
            .write(&query.key, &payload)
            .inspect_err(|e| warn!("Failed to cache {}: {}", query.key, e))
            .err();

        Ok(Resolution {
            payload,
            origin: Origin::Network,
            persist_warning,
        })
    }
}
