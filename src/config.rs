//! Runtime configuration.
//!
//! Values come from an optional YAML file; any key left out takes its
//! default. Command-line flags are applied on top by the binary.
//!
//! ```yaml
//! base_url: https://www.forexfactory.com
//! user_agent: Mozilla/5.0 (compatible; ff_calendar)
//! timeout_secs: 30
//! batch_size: 5
//! batch_delay_ms: 500
//! ```

use crate::error::{CalendarError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.forexfactory.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Origin the calendar, detail and news paths are resolved against.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout for the HTTP client.
    pub timeout_secs: u64,
    /// Article fetches in flight at once.
    pub batch_size: usize,
    /// Pause between article batches.
    pub batch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("Mozilla/5.0 (compatible; ff_calendar/", env!("CARGO_PKG_VERSION"), ")")
                .to_string(),
            timeout_secs: 30,
            batch_size: 5,
            batch_delay_ms: 500,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| CalendarError::Config(e.to_string()))
    }
}

/// Load configuration from `path`, or defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&str>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CalendarError::Config(format!("{path}: {e}")))?;
    let config = Config::from_yaml(&yaml)?;
    info!(%path, base_url = %config.base_url, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("batch_size: 3\nbase_url: http://localhost:8080\n").unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.batch_delay_ms, 500);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Config::from_yaml("batch_size: [not a number").unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
    }

    #[tokio::test]
    async fn test_load_config_without_path() {
        assert_eq!(load_config(None).await.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let err = load_config(Some("/definitely/not/here.yaml")).await.unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
    }
}
