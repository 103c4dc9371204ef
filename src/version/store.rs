//! Key-value store trait backing the timed cache

#[cfg(test)]
use mockall::automock;

use crate::version::error::StoreError;

/// Trait for persisting raw cache records under string keys
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw record stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous record
    ///
    /// # Returns
    /// * `Err(StoreError::QuotaExceeded)` - If the store's capacity limit would be exceeded
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Checks that replacing the record for `key` keeps the store within `limit` bytes.
///
/// Sizes are counted as key length plus value length, like origin storage does.
pub(crate) fn check_quota(
    key: &str,
    value: &str,
    used_by_others: u64,
    limit: Option<u64>,
) -> Result<(), StoreError> {
    let Some(limit) = limit else {
        return Ok(());
    };

    let required = used_by_others + (key.len() + value.len()) as u64;
    if required > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            required,
            limit,
        });
    }
    Ok(())
}
