//! Configuration Management Module
//!
//! This module handles loading and validating the connector configuration: provider
//! credentials and HTTP client settings. Secrets may be overridden from the
//! environment so they never have to live in the TOML file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::{ConnectorError, Result};

/// Environment variable pointing at a custom configuration file.
pub const CONFIG_PATH_ENV: &str = "KYC_CONNECTOR_CONFIG_PATH";
/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/connector.toml";

pub const APP_TOKEN_ENV: &str = "KYC_APP_TOKEN";
pub const APP_SECRET_ENV: &str = "KYC_APP_SECRET";
pub const API_URL_ENV: &str = "KYC_API_URL";

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.sumsub.com";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Provider credentials
    pub credentials: Credentials,
    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Provider credentials. Both secrets are redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application token, sent as `X-App-Token`
    pub app_token: String,
    /// Application secret, used only as the HMAC key
    pub app_secret: String,
    /// API base URL (e.g., "https://api.sumsub.com")
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Whole-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Optional `User-Agent` override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Credentials {
    pub fn new(
        app_token: impl Into<String>,
        app_secret: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            app_token: app_token.into(),
            app_secret: app_secret.into(),
            api_url: api_url.into(),
        }
    }

    /// Checks the credential invariants.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Token and secret are non-empty and the base URL is an absolute http(s) URL
    /// * `Err(ConnectorError::Configuration)` - Which field is wrong and why
    pub fn validate(&self) -> Result<()> {
        if self.app_token.trim().is_empty() {
            return Err(ConnectorError::Configuration(
                "app_token is required and must not be empty".to_string(),
            ));
        }
        if self.app_secret.trim().is_empty() {
            return Err(ConnectorError::Configuration(
                "app_secret is required and must not be empty".to_string(),
            ));
        }
        let url = Url::parse(&self.api_url).map_err(|e| {
            ConnectorError::Configuration(format!("api_url '{}' is not a valid URL: {}", self.api_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConnectorError::Configuration(format!(
                "api_url '{}' must use http or https",
                self.api_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConnectorError::Configuration(format!(
                "api_url '{}' must not carry a query string or fragment",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready to be joined with a request path.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_token", &"<redacted>")
            .field("app_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl ConnectorConfig {
    /// Build a configuration from credentials with default client settings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: ClientConfig::default(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// This function:
    /// 1. Uses the provided path, or `KYC_CONNECTOR_CONFIG_PATH`, or `config/connector.toml`
    /// 2. Parses the file
    /// 3. Applies `KYC_APP_TOKEN` / `KYC_APP_SECRET` / `KYC_API_URL` overrides
    /// 4. Validates the result
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to config file
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectorConfig)` - Successfully loaded and validated configuration
    /// * `Err(ConnectorError::Configuration)` - File missing, unparsable or invalid
    pub fn load_from_path(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(|p| p.to_string())
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if !std::path::Path::new(&config_path).exists() {
            return Err(ConnectorError::Configuration(format!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/connector.template.toml config/connector.toml\n\
                Then edit config/connector.toml with your actual values.",
                config_path
            )));
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            ConnectorError::Configuration(format!("Failed to read '{}': {}", config_path, e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// This is equivalent to calling `load_from_path(None)`.
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Parse a TOML document without applying overrides or validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConnectorError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Replace credential fields with environment values when those are set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        if let Some(token) = read(APP_TOKEN_ENV) {
            self.credentials.app_token = token;
        }
        if let Some(secret) = read(APP_SECRET_ENV) {
            self.credentials.app_secret = secret;
        }
        if let Some(url) = read(API_URL_ENV) {
            self.credentials.api_url = url;
        }
    }

    /// Validates credentials and client settings.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        if self.client.timeout_ms == 0 {
            return Err(ConnectorError::Configuration(
                "client.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
