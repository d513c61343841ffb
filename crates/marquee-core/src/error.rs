//! Error types shared across the Marquee glue layer.
//!
//! All variants are `Clone` so they can be stored in UI state signals and
//! re-rendered without re-running the failed request.

use thiserror::Error;

/// Errors from the movie database API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, TLS, fetch rejection).
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with `Response: "False"` and a message such as
    /// "Movie not found!" or "Too many results.".
    #[error("{0}")]
    Api(String),

    /// Response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Query rejected before any network call was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Errors from the backend-as-a-service REST API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaasError {
    /// Network-level failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Structured error body returned by the service.
    #[error("{message} (code {code})")]
    Api { code: u16, message: String },

    /// Response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// No active session where one is required.
    #[error("not authenticated")]
    Unauthenticated,
}

impl BaasError {
    /// Whether this error is the "no active session" case. The UI treats
    /// this as signed-out state rather than a failure.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated) || matches!(self, Self::Api { code: 401, .. })
    }
}

/// Errors raised while assembling [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required build-time variable was not provided.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<reqwest::Error> for BaasError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_detection() {
        assert!(BaasError::Unauthenticated.is_unauthenticated());
        assert!(BaasError::Api {
            code: 401,
            message: "general_unauthorized_scope".into()
        }
        .is_unauthenticated());
        assert!(!BaasError::Api {
            code: 404,
            message: "collection not found".into()
        }
        .is_unauthenticated());
        assert!(!BaasError::Transport("connection refused".into()).is_unauthenticated());
    }
}
