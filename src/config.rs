use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Time-related constants
// =============================================================================

/// Freshness window of a cached entry in milliseconds (24 hours)
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Default capacity of the cache store in bytes (5 MiB, same as browser origin storage)
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// User agent sent with every release request
pub const DEFAULT_USER_AGENT: &str = "preupver";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub cache: CacheConfig,
    pub http: HttpConfig,
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Capacity limit of the store in bytes, `None` for unlimited
    pub quota_bytes: Option<u64>,
    /// Overrides the database location
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            path: None,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: FETCH_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the database path, preferring the configured override
    pub fn db_path(&self) -> PathBuf {
        self.cache.path.clone().unwrap_or_else(db_path)
    }
}

/// Returns the path to the data directory for preupver.
/// Uses $XDG_DATA_HOME/preupver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/preupver,
/// or ./preupver if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the cache database file.
pub fn db_path() -> PathBuf {
    data_dir().join("cache.db")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("preupver")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "http": {
                "timeoutMs": 1000
            }
        }))
        .unwrap();

        assert_eq!(result.http.timeout_ms, 1000);
        assert_eq!(result.http.user_agent, "preupver");
        assert_eq!(result.cache, CacheConfig::default());
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "cache": {
                "quotaBytes": 2048,
                "path": "/tmp/preupver.db"
            },
            "http": {
                "timeoutMs": 5000,
                "userAgent": "docs-site"
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            Config {
                cache: CacheConfig {
                    quota_bytes: Some(2048),
                    path: Some(PathBuf::from("/tmp/preupver.db")),
                },
                http: HttpConfig {
                    timeout_ms: 5000,
                    user_agent: "docs-site".to_string(),
                }
            }
        );
    }

    #[test]
    fn config_null_quota_means_unlimited() {
        let result = serde_json::from_value::<Config>(json!({
            "cache": { "quotaBytes": null }
        }))
        .unwrap();

        assert_eq!(result.cache.quota_bytes, None);
    }

    #[test]
    fn load_reports_parse_error_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { path: p, .. }) if p == path));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn db_path_prefers_configured_override() {
        let config = Config {
            cache: CacheConfig {
                quota_bytes: None,
                path: Some(PathBuf::from("/srv/cache.db")),
            },
            ..Config::default()
        };

        assert_eq!(config.db_path(), PathBuf::from("/srv/cache.db"));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/preupver"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/preupver"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./preupver"));
    }
}
