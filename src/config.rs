//! Client configuration
//!
//! Settings for the CLI and for callers that prefer a file over code. Loaded
//! from YAML or JSON (chosen by file extension); keys can also come from the
//! `SCOPUS_API_KEYS` environment variable.
//!
//! ```yaml
//! api_keys:
//!   - 0123456789abcdef
//!   - fedcba9876543210
//! timeout_secs: 30
//! rate_limit:
//!   requests_per_second: 6
//!   burst_size: 6
//! ```

use crate::auth::{mask_key, Credentials};
use crate::error::{Error, Result};
use crate::http::{HttpTransportConfig, RateLimiterConfig};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "SCOPUS_API_KEYS";

// ============================================================================
// Client Config
// ============================================================================

/// Client settings loaded from a file
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API keys, tried in order
    #[serde(default)]
    pub api_keys: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pair every record with the key that fetched it
    #[serde(default)]
    pub pair_with_key: bool,

    /// User-Agent header override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side throttling; endpoint default when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// API host override (e.g. a proxy or a mock server)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Default log level; `RUST_LOG` directives take precedence
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            timeout_secs: default_timeout_secs(),
            pair_with_key: false,
            user_agent: None,
            rate_limit: None,
            base_url: None,
            log_level: LogLevel::default(),
        }
    }
}

impl ClientConfig {
    /// Load a config file; `.yaml`/`.yml` as YAML, `.json` as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::config(format!(
                "Unsupported config file '{}' (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Parse YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Parse JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Fill in keys from `SCOPUS_API_KEYS` when none are configured
    #[must_use]
    pub fn with_env(self) -> Self {
        let value = std::env::var(API_KEYS_ENV).ok();
        self.with_env_keys(value.as_deref())
    }

    /// Fill in keys from a comma-separated list when none are configured
    #[must_use]
    pub fn with_env_keys(mut self, value: Option<&str>) -> Self {
        if self.api_keys.is_empty() {
            if let Some(value) = value {
                self.api_keys = split_keys(value);
            }
        }
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_keys.is_empty() {
            return Err(Error::config(format!(
                "No API keys configured (use --api-key, a config file or {API_KEYS_ENV})"
            )));
        }
        if self.api_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(Error::config("API keys cannot be blank"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)?;
        }
        Ok(())
    }

    /// Configured keys as engine credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::from(self.api_keys.clone())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport settings, falling back to `default_rate` for throttling
    pub fn transport_config(&self, default_rate: RateLimiterConfig) -> HttpTransportConfig {
        let mut builder =
            HttpTransportConfig::builder().rate_limit(self.rate_limit.unwrap_or(default_rate));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.api_keys.iter().map(|k| mask_key(k)).collect();
        f.debug_struct("ClientConfig")
            .field("api_keys", &keys)
            .field("timeout_secs", &self.timeout_secs)
            .field("pair_with_key", &self.pair_with_key)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn split_keys(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let config = ClientConfig::from_yaml_str("api_keys: [abc]").unwrap();
        assert_eq!(config.api_keys, vec!["abc"]);
        assert_eq!(config.timeout_secs, 60);
        assert!(!config.pair_with_key);
        assert!(config.rate_limit.is_none());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api_keys:
  - key-one
  - key-two
timeout_secs: 15
pair_with_key: true
user_agent: bibliometrics/1.0
rate_limit:
  requests_per_second: 2
  burst_size: 4
base_url: http://localhost:8080
log_level: debug
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.api_keys, vec!["key-one", "key-two"]);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.pair_with_key);
        assert_eq!(config.user_agent.as_deref(), Some("bibliometrics/1.0"));
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 4)));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(".yaml", "api_keys: [abc, def]\ntimeout_secs: 5\n");
        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.api_keys.len(), 2);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_load_json_file() {
        let file = write_temp(".json", r#"{"api_keys": ["abc"], "pair_with_key": true}"#);
        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.api_keys, vec!["abc"]);
        assert!(config.pair_with_key);
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = write_temp(".toml", "api_keys = []");
        let err = ClientConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ClientConfig::from_yaml_str("api_keys: {").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_env_keys_fill_empty_config() {
        let config = ClientConfig::default().with_env_keys(Some(" a, b ,,c "));
        assert_eq!(config.api_keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_env_keys_do_not_override_configured_keys() {
        let config = ClientConfig {
            api_keys: vec!["file".to_string()],
            ..ClientConfig::default()
        }
        .with_env_keys(Some("env"));
        assert_eq!(config.api_keys, vec!["file"]);
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_err());

        let mut config = ClientConfig::default().with_env_keys(Some("abc"));
        assert!(config.validate().is_ok());

        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.timeout_secs = 10;
        config.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_transport_config_uses_default_rate() {
        let config = ClientConfig::default();
        let transport = config.transport_config(RateLimiterConfig::serial_title());
        assert_eq!(transport.rate_limit, Some(RateLimiterConfig::serial_title()));

        let config = ClientConfig {
            rate_limit: Some(RateLimiterConfig::new(1, 1)),
            user_agent: Some("agent/2".to_string()),
            ..ClientConfig::default()
        };
        let transport = config.transport_config(RateLimiterConfig::serial_title());
        assert_eq!(transport.rate_limit, Some(RateLimiterConfig::new(1, 1)));
        assert_eq!(transport.user_agent, "agent/2");
    }

    #[test]
    fn test_debug_masks_keys() {
        let config = ClientConfig::default().with_env_keys(Some("supersecretkey"));
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("supersecretkey"));
    }
}
