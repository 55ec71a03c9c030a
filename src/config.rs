//! Configuration Management
//!
//! Handles persistent configuration storage for mrnctl and resolves the
//! connection settings for one invocation (flag > environment > file).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// API versions this client speaks
pub const SUPPORTED_API_VERSIONS: &[&str] = &["1"];

pub const DEFAULT_API_VERSION: &str = "1";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Service endpoint, without the version suffix
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Identity-service token
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mrnctl").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub region_name: Option<String>,
    pub api_version: Option<String>,
}

/// Effective connection settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub token: Option<String>,
    pub region_name: Option<String>,
    pub api_version: String,
}

impl Settings {
    /// Resolve settings: overrides win over the config file
    pub fn resolve(overrides: Overrides, config: Config) -> Result<Self> {
        let endpoint = non_blank(overrides.endpoint)
            .or(non_blank(config.endpoint))
            .ok_or_else(|| {
                Error::Config(
                    "no service endpoint configured; set OS_MULTIREGION_NETWORKING_URL \
                     or use --os-multiregion-networking-url"
                        .into(),
                )
            })?;

        let api_version = non_blank(overrides.api_version)
            .or(non_blank(config.api_version))
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        if !SUPPORTED_API_VERSIONS.contains(&api_version.as_str()) {
            return Err(Error::Config(format!(
                "unsupported API version '{}'; supported: {}",
                api_version,
                SUPPORTED_API_VERSIONS.join(", ")
            )));
        }

        Ok(Self {
            endpoint,
            token: non_blank(overrides.token).or(non_blank(config.token)),
            region_name: non_blank(overrides.region_name).or(non_blank(config.region_name)),
            api_version,
        })
    }

    /// Versioned base URL, `<endpoint>/v<version>`
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        let suffix = format!("/v{}", self.api_version);
        if endpoint.ends_with(&suffix) {
            endpoint.to_string()
        } else {
            format!("{}{}", endpoint, suffix)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(endpoint: Option<&str>) -> Overrides {
        Overrides {
            endpoint: endpoint.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = Config {
            endpoint: Some("http://file:19999".into()),
            token: Some("file-token".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(overrides(Some("http://flag:19999")), config).unwrap();

        assert_eq!(settings.endpoint, "http://flag:19999");
        assert_eq!(settings.token.as_deref(), Some("file-token"));
        assert_eq!(settings.api_version, "1");
    }

    #[test]
    fn test_missing_endpoint_is_an_error() {
        let err = Settings::resolve(overrides(Some("  ")), Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unsupported_api_version_is_an_error() {
        let mut o = overrides(Some("http://host"));
        o.api_version = Some("2".into());
        assert!(Settings::resolve(o, Config::default()).is_err());
    }

    #[test]
    fn test_base_url_appends_version_once() {
        let settings =
            Settings::resolve(overrides(Some("http://host:19999/")), Config::default()).unwrap();
        assert_eq!(settings.base_url(), "http://host:19999/v1");

        let settings =
            Settings::resolve(overrides(Some("http://host:19999/v1")), Config::default()).unwrap();
        assert_eq!(settings.base_url(), "http://host:19999/v1");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            endpoint: Some("http://host".into()),
            api_version: Some("1".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/mrnctl/config.json"));
        assert_eq!(config, Config::default());
    }
}
