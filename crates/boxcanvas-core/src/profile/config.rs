//! Profile loader configuration.

use super::error::ConfigError;
use super::model::UserId;
use std::time::Duration;
use url::Url;

/// Environment variable overriding the user directory base URL.
pub const ENV_USER_API: &str = "BOXCANVAS_USER_API";
/// Environment variable overriding the HTTP timeout (milliseconds).
pub const ENV_TIMEOUT_MS: &str = "BOXCANVAS_TIMEOUT_MS";
/// Environment variable overriding the simulated weather latency (milliseconds).
pub const ENV_WEATHER_LATENCY_MS: &str = "BOXCANVAS_WEATHER_LATENCY_MS";
/// Environment variable overriding the demo user that always fails.
pub const ENV_FAILING_USER: &str = "BOXCANVAS_FAILING_USER";

/// Settings for fetching profile data.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    /// Base URL of the user directory (`{base}/users/{id}`).
    pub user_api_base: String,
    /// Timeout for a single HTTP request.
    pub request_timeout: Duration,
    /// Delay before the simulated weather service answers.
    pub weather_latency: Duration,
    /// User that is rejected after being fetched, to exercise the error path.
    pub failing_user: Option<UserId>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_api_base: "https://jsonplaceholder.typicode.com".to_string(),
            request_timeout: Duration::from_secs(10),
            weather_latency: Duration::from_millis(600),
            failing_user: Some(UserId(4)),
        }
    }
}

impl ProfileConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_USER_API) {
            let url = Url::parse(&value).map_err(|source| ConfigError::InvalidUrl {
                key: ENV_USER_API,
                source,
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::UnsupportedScheme {
                    key: ENV_USER_API,
                    scheme: url.scheme().to_string(),
                });
            }
            config.user_api_base = value;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout = parse_millis(ENV_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_WEATHER_LATENCY_MS) {
            config.weather_latency = parse_millis(ENV_WEATHER_LATENCY_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_FAILING_USER) {
            // Empty disables the failing user
            config.failing_user = if value.trim().is_empty() {
                None
            } else {
                let id = value.trim().parse().map_err(|_| ConfigError::InvalidUserId {
                    key: ENV_FAILING_USER,
                    value: value.clone(),
                })?;
                Some(UserId(id))
            };
        }

        Ok(config)
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDuration {
            key,
            value: value.to_string(),
        })
}
