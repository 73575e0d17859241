//! Error types for the PokeAPI client core.
//!
//! # Design
//! From a screen's point of view there is exactly one failure: the request
//! failed. Screens never branch on the cause. The variants below exist so the
//! log line says *why* (status and body, a malformed payload, or the host's
//! transport error), not so callers can tell a 404 from a 500.

use thiserror::Error;

/// Errors returned by `PokeApiClient` parse methods and reported by hosts.
///
/// Screen loaders treat every variant as the same "request failed" outcome;
/// the variant only shapes the log line.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The upstream answered with a non-2xx status.
    #[error("request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The response body did not match the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The host could not complete the round-trip (DNS, connect, timeout...).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading a `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_includes_status() {
        let err = ApiError::RequestFailed {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with HTTP 404: Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn only_request_failures_carry_a_status() {
        let errors = [
            ApiError::Deserialization("missing field `name`".to_string()),
            ApiError::Transport("connection refused".to_string()),
        ];
        for err in &errors {
            assert_eq!(err.status(), None, "{err}");
        }
    }
}
