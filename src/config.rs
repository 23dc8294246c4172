//! Application configuration
//!
//! Everything has a default, so an empty YAML document is a valid config.
//!
//! ```yaml
//! base_url: https://jsonplaceholder.typicode.com/
//! status_policy: short_circuit
//! http:
//!   timeout_secs: 10
//!   rate_limit:
//!     requests_per_second: 5
//!     burst_size: 5
//! paging:
//!   page_size: 30
//!   prefetch_distance: 10
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PagingConfig;
use crate::repository::StatusPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Public endpoint serving the photo collection
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

/// Default items per page
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST endpoint
    pub base_url: String,
    /// Treatment of non-success statuses
    pub status_policy: StatusPolicy,
    /// Transport settings
    pub http: HttpSettings,
    /// Page sizing
    pub paging: PagingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            status_policy: StatusPolicy::default(),
            http: HttpSettings::default(),
            paging: PagingSettings::default(),
        }
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Extra headers sent with every request
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Client-side throttle, off when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
            headers: BTreeMap::new(),
            rate_limit: None,
        }
    }
}

/// Page sizing
///
/// One size covers every load, the first one included. Unknown keys are
/// rejected so a stray size setting cannot be silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagingSettings {
    pub page_size: u32,
    /// Defaults to `page_size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefetch_distance: Option<u32>,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_distance: None,
        }
    }
}

impl AppConfig {
    /// Check that the config describes a usable endpoint and page sizes
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }

        if let Some(limit) = &self.http.rate_limit {
            if limit.requests_per_second == 0 || limit.burst_size == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit",
                    "requests_per_second and burst_size must be at least 1",
                ));
            }
        }

        if self.paging.page_size == 0 {
            return Err(Error::invalid_value("paging.page_size", "must be at least 1"));
        }

        Ok(())
    }

    /// HTTP client configuration for this endpoint
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(limit) = self.http.rate_limit {
            builder = builder.rate_limit(limit);
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Paging configuration
    pub fn paging_config(&self) -> PagingConfig {
        let settings = &self.paging;
        PagingConfig::new(settings.page_size)
            .with_prefetch_distance(settings.prefetch_distance.unwrap_or(settings.page_size))
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Load a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    load_config_from_str(&content)
}

/// Parse and validate a YAML config
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig> {
    // An empty document parses as null
    let config: AppConfig = if yaml.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.status_policy, StatusPolicy::ShortCircuit);
        assert!(config.validate().is_ok());

        let paging = config.paging_config();
        assert_eq!(paging, PagingConfig::new(30));

        let http = config.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(load_config_from_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
base_url: http://localhost:3000/
status_policy: fall_through
http:
  timeout_secs: 5
  user_agent: gallery/2.0
  headers:
    X-Trace: enabled
  rate_limit:
    requests_per_second: 2
paging:
  page_size: 10
  prefetch_distance: 3
";
        let config = load_config_from_str(yaml).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.status_policy, StatusPolicy::FallThrough);
        assert_eq!(
            config.http.rate_limit,
            Some(RateLimiterConfig::new(2, 1))
        );

        let paging = config.paging_config();
        assert_eq!(paging.page_size, 10);
        assert_eq!(paging.prefetch_distance, 3);

        let http = config.http_client_config();
        assert_eq!(http.user_agent, "gallery/2.0");
        assert_eq!(http.default_headers.get("X-Trace"), Some(&"enabled".to_string()));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            load_config_from_str("base_url: not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            load_config_from_str("base_url: ftp://example.com/"),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            load_config_from_str("paging:\n  page_size: 0"),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            load_config_from_str("http:\n  timeout_secs: 0"),
            Err(Error::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            load_config_from_str("paging: [1, 2]"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_separate_initial_load_size() {
        let result = load_config_from_str("paging:\n  page_size: 2\n  initial_load_size: 4");
        match result {
            Err(Error::Config { message }) => assert!(message.contains("initial_load_size")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "paging:\n  page_size: 12").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.paging.page_size, 12);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_load_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(load_config_from_str(&yaml).unwrap(), config);
    }
}
