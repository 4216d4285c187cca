//! Error types for the pricescout crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Errors that can occur during a price search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider returned a payload that could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// A provider did not respond within the configured deadline.
    #[error("provider timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for pricescout results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected payload shape".into());
        assert_eq!(err.to_string(), "parse error: unexpected payload shape");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("Amazon (via RapidAPI) after 12s".into());
        assert_eq!(
            err.to_string(),
            "provider timed out: Amazon (via RapidAPI) after 12s"
        );
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
