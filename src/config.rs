//! Configuration for the pager
//!
//! Everything has a default, so an empty YAML document (or no file at all)
//! yields a pager pointed at the public character listing.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default remote listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/character/";

/// Default logical resource tag used in cache keys
pub const DEFAULT_RESOURCE: &str = "characters";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete pager configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Listing endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Logical resource tag for cache keys
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Query parameter carrying the page number
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Remote page number sent for page index 0
    #[serde(default)]
    pub start_page: u32,

    /// Warm the cache with the next page after each load
    #[serde(default = "default_true")]
    pub prefetch: bool,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource: default_resource(),
            page_param: default_page_param(),
            start_page: 0,
            prefetch: true,
            http: HttpConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_true() -> bool {
    true
}

impl PagerConfig {
    /// Create a new config builder
    pub fn builder() -> PagerConfigBuilder {
        PagerConfigBuilder::default()
    }

    /// Parse a config from a YAML string and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.page_param.trim().is_empty() {
            return Err(Error::invalid_value("page_param", "must not be empty"));
        }
        if self.resource.trim().is_empty() {
            return Err(Error::invalid_value("resource", "must not be empty"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value("http.timeout_seconds", "must be > 0"));
        }
        Ok(())
    }

    /// Serialize the effective config back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds));
        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Cache Config
// ============================================================================

/// Page cache configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Age after which a cached page counts as a miss. Never, when unset.
    #[serde(default)]
    pub stale_after_seconds: Option<u64>,
}

impl CacheConfig {
    /// Staleness threshold as a duration
    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after_seconds.map(Duration::from_secs)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`PagerConfig`]
#[derive(Default)]
pub struct PagerConfigBuilder {
    config: PagerConfig,
}

impl PagerConfigBuilder {
    /// Set the listing endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the cache resource tag
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.config.resource = resource.into();
        self
    }

    /// Set the page query parameter and the remote number of page index 0
    pub fn page_param(mut self, param: impl Into<String>, start_page: u32) -> Self {
        self.config.page_param = param.into();
        self.config.start_page = start_page;
        self
    }

    /// Enable or disable next-page prefetch
    pub fn prefetch(mut self, enabled: bool) -> Self {
        self.config.prefetch = enabled;
        self
    }

    /// Set the request timeout
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.http.timeout_seconds = seconds;
        self
    }

    /// Set the cache staleness threshold
    pub fn stale_after_seconds(mut self, seconds: u64) -> Self {
        self.config.cache.stale_after_seconds = Some(seconds);
        self
    }

    /// Build the config
    pub fn build(self) -> PagerConfig {
        self.config
    }
}
