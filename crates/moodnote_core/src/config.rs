//! Mood detection configuration.
//!
//! # Responsibility
//! - Collect classifier endpoint, credential, timeout and cache bound.
//! - Read overrides from the process environment with strict validation.
//!
//! # Invariants
//! - Blank values behave as unset.
//! - The credential is never included in `Debug` output or error messages.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Hosted sentiment model used when no endpoint override is configured.
pub const DEFAULT_CLASSIFIER_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest";
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_CLASSIFIER_URL: &str = "MOODNOTE_CLASSIFIER_URL";
pub const ENV_CLASSIFIER_TOKEN: &str = "MOODNOTE_CLASSIFIER_TOKEN";
pub const ENV_CLASSIFIER_TIMEOUT_MS: &str = "MOODNOTE_CLASSIFIER_TIMEOUT_MS";
pub const ENV_MOOD_CACHE_CAPACITY: &str = "MOODNOTE_MOOD_CACHE_CAPACITY";

/// Token captured at build time, used when the runtime variable is unset.
const BUILD_TIME_TOKEN: Option<&str> = option_env!("MOODNOTE_CLASSIFIER_TOKEN");

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    HttpClient(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
            Self::HttpClient(message) => write!(f, "failed to build http client: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for the mood resolver and its remote classifier.
#[derive(Clone, PartialEq, Eq)]
pub struct MoodConfig {
    pub endpoint: String,
    /// Bearer credential. `None` disables the remote classifier.
    pub api_token: Option<String>,
    pub timeout: Duration,
    /// `None` keeps the cache unbounded.
    pub cache_capacity: Option<NonZeroUsize>,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLASSIFIER_ENDPOINT.to_string(),
            api_token: None,
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
            cache_capacity: None,
        }
    }
}

impl Debug for MoodConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl MoodConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, starting from defaults.
    ///
    /// The token falls back to the value captured at build time.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(endpoint) = read(ENV_CLASSIFIER_URL) {
            config.endpoint = normalize_endpoint(&endpoint)?;
        }

        config.api_token = read(ENV_CLASSIFIER_TOKEN).or_else(|| {
            BUILD_TIME_TOKEN
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        });

        if let Some(raw) = read(ENV_CLASSIFIER_TIMEOUT_MS) {
            let millis = raw
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_CLASSIFIER_TIMEOUT_MS,
                    value: raw.clone(),
                    reason: "expected a positive integer of milliseconds",
                })?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = read(ENV_MOOD_CACHE_CAPACITY) {
            let capacity = raw
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_MOOD_CACHE_CAPACITY,
                    value: raw.clone(),
                    reason: "expected a positive integer",
                })?;
            config.cache_capacity = Some(capacity);
        }

        Ok(config)
    }

    /// Returns whether a credential is available for remote calls.
    pub fn remote_enabled(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Validates that `endpoint` is an absolute http(s) URL.
pub fn normalize_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let trimmed = endpoint.trim();
    let parsed = reqwest::Url::parse(trimmed).map_err(|_| ConfigError::InvalidValue {
        key: ENV_CLASSIFIER_URL,
        value: trimmed.to_string(),
        reason: "expected an absolute URL",
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidValue {
            key: ENV_CLASSIFIER_URL,
            value: trimmed.to_string(),
            reason: "expected an http or https URL",
        }),
    }
}
