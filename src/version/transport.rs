//! Transport trait for fetching release listings from remote endpoints

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

/// Trait for issuing GET requests against a release endpoint
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the response body of `endpoint`
    ///
    /// # Returns
    /// * `Ok(String)` - Body of a successful (2xx) response
    /// * `Err(FetchError)` - On transport failure or a non-success status
    async fn get(&self, endpoint: &str) -> Result<String, FetchError>;
}
