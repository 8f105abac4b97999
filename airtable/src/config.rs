//! Connection configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default REST root.
pub const DEFAULT_ENDPOINT: &str = "https://api.airtable.com/v0/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const API_KEY_ENV: &str = "AIRTABLE_API_KEY";
pub const BASE_ID_ENV: &str = "AIRTABLE_BASE_ID";
pub const ENDPOINT_ENV: &str = "AIRTABLE_ENDPOINT";

/// Immutable connection parameters for a [`Client`](crate::Client).
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_id: String,
    /// REST root; always ends in `/`.
    pub endpoint: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for the default endpoint.
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID` and, if set,
    /// `AIRTABLE_ENDPOINT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(require_env(API_KEY_ENV)?, require_env(BASE_ID_ENV)?)?;
        if let Some(endpoint) = optional_env(ENDPOINT_ENV) {
            config.set_endpoint(&endpoint)?;
        }
        Ok(config)
    }

    /// Parses and normalizes a REST root.
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<(), ConfigError> {
        self.endpoint = normalize_endpoint(endpoint)?;
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::empty("API key"));
        }
        if self.base_id.trim().is_empty() {
            return Err(ConfigError::empty("base id"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

pub(crate) fn normalize_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn require_env(var: &'static str) -> Result<String, ConfigError> {
    optional_env(var).ok_or(ConfigError::MissingEnv { var })
}

fn optional_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var(BASE_ID_ENV);
            std::env::remove_var(ENDPOINT_ENV);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key", "appBase").unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_identifiers_rejected() {
        assert!(matches!(
            ClientConfig::new("", "appBase"),
            Err(ConfigError::EmptyIdentifier { what: "API key" })
        ));
        assert!(matches!(
            ClientConfig::new("key", "  "),
            Err(ConfigError::EmptyIdentifier { what: "base id" })
        ));
    }

    #[test]
    fn test_endpoint_gets_trailing_slash() {
        let url = normalize_endpoint("http://localhost:8080/v0").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v0/");
        assert!(normalize_endpoint("not a url").is_err());
        assert!(matches!(
            normalize_endpoint("mailto:ops@example.com"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("keySECRET", "appBase").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("keySECRET"));
        assert!(debug.contains("appBase"));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env() {
        clear_env();
        // SAFETY: serialized
        unsafe {
            std::env::set_var(API_KEY_ENV, "keyFromEnv");
            std::env::set_var(BASE_ID_ENV, "appFromEnv");
            std::env::set_var(ENDPOINT_ENV, "http://127.0.0.1:9999/v0");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "keyFromEnv");
        assert_eq!(config.base_id, "appFromEnv");
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:9999/v0/");

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_missing_key() {
        clear_env();
        // SAFETY: serialized
        unsafe {
            std::env::set_var(BASE_ID_ENV, "appFromEnv");
        }

        assert!(matches!(
            ClientConfig::from_env(),
            Err(ConfigError::MissingEnv { var: API_KEY_ENV })
        ));

        clear_env();
    }
}
