use crate::error::{SdkError, SdkResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Production gateway endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.phaseo.app/v1";

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("ai-stats-rust/", env!("CARGO_PKG_VERSION"));

const API_KEY_ENV: &str = "AI_STATS_API_KEY";
const BASE_URL_ENV: &str = "AI_STATS_BASE_URL";
const TIMEOUT_ENV: &str = "AI_STATS_TIMEOUT_SECS";

/// Configuration for an [`AiStats`](crate::AiStats) client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    /// Whole-request deadline enforced by the transport. `None` means no deadline.
    pub timeout: Option<Duration>,
    /// Extra headers sent on every request, after `Authorization` and `User-Agent`
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Configuration for the production gateway with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Load configuration from environment variables
    /// This is the ONLY method that should access environment variables
    ///
    /// Reads `AI_STATS_API_KEY`, and optionally `AI_STATS_BASE_URL` and
    /// `AI_STATS_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Configuration`] if the timeout is not a whole number
    /// of seconds or if the resulting configuration fails [`validate`](Self::validate).
    pub fn from_env() -> SdkResult<Self> {
        let mut config = Self::default();

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let seconds = raw.trim().parse::<u64>().map_err(|e| {
                SdkError::configuration(format!("{TIMEOUT_ENV} must be a whole number: {e}"))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            has_api_key = config.api_key.is_some(),
            timeout_secs = config.timeout.map(|t| t.as_secs()),
            "SDK configuration loaded from environment"
        );

        Ok(config)
    }

    /// Validate the configuration is complete
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Configuration`] if:
    /// - The API key is missing or blank
    /// - The base URL does not parse, or is not http/https
    pub fn validate(&self) -> SdkResult<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(SdkError::configuration("AI Stats API key is required")),
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            SdkError::configuration(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::configuration(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Build the HTTP transport this configuration describes
    ///
    /// The returned client is cheap to clone and shares its connection pool.
    pub fn build_http_client(&self) -> SdkResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| {
            SdkError::configuration(format!("Failed to create HTTP client: {e}"))
        })
    }
}
