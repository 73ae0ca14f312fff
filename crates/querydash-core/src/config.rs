//! Runtime configuration

use std::time::Duration;

pub const API_KEY_ENV: &str = "QUERYDASH_API_KEY";
/// Accepted when `QUERYDASH_API_KEY` is unset
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ENDPOINT_ENV: &str = "QUERYDASH_ENDPOINT";
pub const MODEL_ENV: &str = "QUERYDASH_MODEL";
pub const LOCAL_DELAY_ENV: &str = "QUERYDASH_LOCAL_DELAY_MS";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LOCAL_DELAY_MS: u64 = 1000;

/// Resolver configuration
#[derive(Clone)]
pub struct Config {
    /// Credential for the remote endpoint (remote mode fails without it)
    pub api_key: Option<String>,

    /// Base URL of the generative-language API
    pub endpoint: String,

    /// Model name appended to the endpoint
    pub model: String,

    /// Simulated latency of the local resolver
    pub local_delay: Duration,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            local_delay: Duration::from_millis(DEFAULT_LOCAL_DELAY_MS),
        }
    }

    /// Defaults overlaid with `QUERYDASH_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        config.api_key = get(API_KEY_ENV).or_else(|| get(FALLBACK_API_KEY_ENV));
        if let Some(endpoint) = get(ENDPOINT_ENV) {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(MODEL_ENV) {
            config.model = model;
        }
        if let Some(raw) = get(LOCAL_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.local_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid {}", LOCAL_DELAY_ENV);
                }
            }
        }

        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full generateContent URL without the credential
    pub fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// keep the credential out of debug output
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("local_delay", &self.local_delay)
            .finish()
    }
}
