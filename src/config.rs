use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default verdict cache TTL in milliseconds (24 hours)
pub const DEFAULT_VERDICT_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Timeout for a combined metadata fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: i64 = 30_000;

/// Gate configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GateConfig {
    /// Installed version override; defaults to this crate's package version
    pub installed_version: Option<String>,
    pub cache: CacheConfig,
    pub sources: SourcesConfig,
    /// Policy to decide against when every source is unreachable and no
    /// cached verdict exists. Absent means "no forced update known".
    pub fallback: Option<FallbackConfig>,
}

/// Cache- and timeout-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Verdict TTL in milliseconds
    pub verdict_ttl: i64,
    /// Fetch timeout in milliseconds
    pub fetch_timeout: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            verdict_ttl: DEFAULT_VERDICT_TTL_MS,
            fetch_timeout: FETCH_TIMEOUT_MS,
        }
    }
}

/// Which metadata sources are consulted. A source is enabled by being present.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourcesConfig {
    pub app_store: Option<AppStoreConfig>,
    pub remote_config: Option<RemoteEndpointConfig>,
}

/// Store catalog lookup configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppStoreConfig {
    pub base_url: String,
    pub bundle_id: String,
    /// Numeric store identifier used to build the store page URL
    pub app_id: Option<u64>,
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com".to_string(),
            bundle_id: String::new(),
            app_id: None,
        }
    }
}

/// Remote config endpoint configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteEndpointConfig {
    pub endpoint: String,
}

/// Fallback update policy for when no source is reachable
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FallbackConfig {
    pub latest_version: String,
    pub min_required_version: String,
}

impl GateConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
