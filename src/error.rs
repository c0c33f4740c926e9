//! Error types for censys-asm-search
//!
//! Every failure the pipeline can produce is a variant here so the binary can
//! decide how to report it and which exit code to use.

use std::fmt;

/// Result type alias for censys-asm-search operations
pub type Result<T> = std::result::Result<T, Error>;

/// The upstream API an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// Censys Search (internet-wide index)
    Search,
    /// Censys ASM (asset inventory)
    Asm,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "Censys Search"),
            Self::Asm => write!(f, "Censys ASM"),
        }
    }
}

/// Error types for censys-asm-search operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 429 from either API
    #[error("{api} rate limit exceeded")]
    RateLimited { api: Api },

    /// HTTP 400, the query could not be parsed upstream
    #[error("{api} could not parse the query")]
    BadQuery { api: Api },

    /// Any other non-2xx response
    #[error("{api} returned an error: {message}")]
    Upstream { api: Api, message: String },

    /// One or more required credentials are not set
    #[error("missing API credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file parsing error
    #[error("Settings parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_display() {
        let err = Error::RateLimited { api: Api::Asm };
        assert_eq!(err.to_string(), "Censys ASM rate limit exceeded");
    }

    #[test]
    fn test_upstream_display() {
        let err = Error::Upstream {
            api: Api::Search,
            message: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Censys Search returned an error: internal error"
        );
    }

    #[test]
    fn test_missing_credentials_display() {
        let err = Error::MissingCredentials(vec!["CENSYS_API_UID", "CENSYS_ASM_API_KEY"]);
        assert_eq!(
            err.to_string(),
            "missing API credentials: CENSYS_API_UID, CENSYS_ASM_API_KEY"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.to_string().contains("JSON parsing failed"));
    }
}
