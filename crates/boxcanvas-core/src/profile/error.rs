//! Profile loading errors.

use super::model::UserId;
use thiserror::Error;

/// Errors raised while fetching profile data.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("User does not exist")]
    UserDoesNotExist(UserId),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got {value:?}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("{key} must be a user id, got {value:?}")]
    InvalidUserId { key: &'static str, value: String },
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{key} must use http or https, got {scheme}")]
    UnsupportedScheme { key: &'static str, scheme: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_does_not_exist_message() {
        let err = ProfileError::UserDoesNotExist(UserId(4));
        assert_eq!(err.to_string(), "User does not exist");
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidDuration {
            key: "BOXCANVAS_TIMEOUT_MS",
            value: "soon".to_string(),
        };
        assert!(err.to_string().contains("BOXCANVAS_TIMEOUT_MS"));
        assert!(err.to_string().contains("soon"));
    }
}
