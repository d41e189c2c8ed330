//! Client configuration.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HorusPayError, HorusPayResult};

/// Sandbox API base URL.
pub const SANDBOX_BASE: &str = "https://sandbox.horuspay.africa";
/// Production API base URL.
pub const PRODUCTION_BASE: &str = "https://api.horuspay.africa";
/// Development API base URL.
pub const DEVELOPMENT_BASE: &str = "https://dev-api.horuspay.africa";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "HORUSPAY_API_BASE";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Target API environment.
///
/// Deserialization accepts the same names as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    #[default]
    Sandbox,
    Development,
    Production,
    /// Base URL must come from an explicit override.
    Custom,
}

impl Environment {
    /// Returns the default base URL of this environment.
    pub fn default_base(&self) -> Option<&'static str> {
        match self {
            Self::Sandbox => Some(SANDBOX_BASE),
            Self::Development => Some(DEVELOPMENT_BASE),
            Self::Production => Some(PRODUCTION_BASE),
            Self::Custom => None,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = HorusPayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Environment {
    type Err = HorusPayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" | "" => Ok(Self::Sandbox),
            "development" | "dev" => Ok(Self::Development),
            "production" | "live" => Ok(Self::Production),
            "custom" => Ok(Self::Custom),
            other => Err(HorusPayError::config(format!(
                "Unknown environment '{}': expected sandbox, development, production or custom",
                other
            ))),
        }
    }
}

/// Configuration read by the request dispatcher on every call.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Secret API key. Takes precedence over `token`.
    pub api_key: Option<String>,
    /// Session bearer token.
    pub token: Option<String>,
    /// Account scoping for session-token requests.
    pub account_id: Option<String>,
    /// Target environment.
    pub environment: Environment,
    /// Explicit base URL, overriding everything else.
    pub api_base: Option<String>,
    /// API version path segment.
    pub api_version: String,
    /// Whether TLS certificates are verified.
    pub verify_ssl_certs: bool,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            account_id: None,
            environment: Environment::Sandbox,
            api_base: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            verify_ssl_certs: true,
            timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("token", &redact(&self.token))
            .field("account_id", &self.account_id)
            .field("environment", &self.environment)
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("verify_ssl_certs", &self.verify_ssl_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key and clears any session token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_api_key(api_key);
        self
    }

    /// Sets the session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Sets the account id.
    pub fn with_account_id(mut self, account_id: impl ToString) -> Self {
        self.set_account_id(account_id);
        self
    }

    /// Sets the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets an explicit base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Sets the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets whether TLS certificates are verified.
    pub fn with_verify_ssl_certs(mut self, verify: bool) -> Self {
        self.verify_ssl_certs = verify;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the API key and clears any session token.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
        self.token = None;
    }

    /// Sets the session token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Sets the account id.
    pub fn set_account_id(&mut self, account_id: impl ToString) {
        self.account_id = Some(account_id.to_string());
    }

    /// Removes the API key so the session token is used.
    pub fn clear_api_key(&mut self) {
        self.api_key = None;
    }

    /// Returns the API key, if one is set and non-empty.
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Returns the credential sent as the bearer token.
    pub fn bearer_token(&self) -> Option<&str> {
        self.active_api_key()
            .or_else(|| self.token.as_deref().filter(|token| !token.is_empty()))
    }

    /// Returns the account id to scope session-token requests with.
    ///
    /// API keys are bound to an account server-side, so this is `None`
    /// whenever an API key is in use.
    pub fn scoped_account_id(&self) -> Option<&str> {
        if self.active_api_key().is_some() {
            return None;
        }
        self.account_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Resolves the base URL, reading the `HORUSPAY_API_BASE` override from the process environment.
    pub fn base_url(&self) -> HorusPayResult<String> {
        let env_base = std::env::var(API_BASE_ENV).ok();
        self.resolve_base_url(env_base.as_deref())
    }

    /// Resolves the base URL: explicit override, then `env_override`, then the environment default.
    pub fn resolve_base_url(&self, env_override: Option<&str>) -> HorusPayResult<String> {
        if let Some(base) = self.api_base.as_deref().filter(|base| !base.is_empty()) {
            return Ok(base.trim_end_matches('/').to_string());
        }

        if let Some(base) = env_override.filter(|base| !base.is_empty()) {
            return Ok(base.trim_end_matches('/').to_string());
        }

        self.environment
            .default_base()
            .map(str::to_string)
            .ok_or_else(|| {
                HorusPayError::config(format!(
                    "Environment 'custom' requires an explicit api_base or {}",
                    API_BASE_ENV
                ))
            })
    }

    /// Loads configuration from `HORUSPAY_*` environment variables.
    pub fn from_env() -> HorusPayResult<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(token) = var("HORUSPAY_TOKEN") {
            config.token = Some(token);
        }
        if let Some(api_key) = var("HORUSPAY_API_KEY") {
            config.set_api_key(api_key);
        }
        if let Some(account_id) = var("HORUSPAY_ACCOUNT_ID") {
            config.account_id = Some(account_id);
        }
        if let Some(environment) = var("HORUSPAY_ENVIRONMENT") {
            config.environment = environment.parse()?;
        }
        if let Some(version) = var("HORUSPAY_API_VERSION") {
            config.api_version = version;
        }

        Ok(config)
    }

    /// Parses configuration from the `[horuspay]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> HorusPayResult<Self> {
        let document: toml::Value = toml::from_str(content)
            .map_err(|e| HorusPayError::config(format!("Parse error: {}", e)))?;

        let Some(table) = document.get("horuspay") else {
            return Ok(Self::default());
        };

        table
            .clone()
            .try_into()
            .map_err(|e| HorusPayError::config(format!("Parse error: {}", e)))
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> HorusPayResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HorusPayError::config(format!("IO error reading {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}
