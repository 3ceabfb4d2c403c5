//! Error types for marketo-client.

use crate::envelope::ApiError;

/// Result type alias for Marketo API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Marketo API operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is a transport-level failure worth
    /// re-issuing (connection problems and request timeouts).
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_) | ErrorKind::Timeout)
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if the response envelope carried application-level errors.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The request could not be built or sent.
    #[error("transport error: {0}")]
    Transport(String),

    /// The HTTP layer returned a non-200 status for the named operation.
    #[error("{operation}: unexpected HTTP status {status}")]
    Http {
        operation: &'static str,
        status: u16,
    },

    /// HTTP 200, but the response envelope carried application-level errors.
    #[error("API error (HTTP {status}): {}", join_reasons(reasons))]
    Api { status: u16, reasons: Vec<ApiError> },

    /// The requested entity does not exist (e.g. an unknown batch ID).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed JSON/CSV body, or a record failing to decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// The caller's cancellation signal fired before completion.
    #[error("canceled: {0}")]
    Canceled(String),

    /// The request deadline elapsed.
    #[error("request timeout")]
    Timeout,

    /// Token acquisition failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

fn join_reasons(reasons: &[ApiError]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_decode() {
            ErrorKind::Decode(sanitize_error_message(&err.to_string()))
        } else {
            ErrorKind::Transport(sanitize_error_message(&err.to_string()))
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Config(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("invalid endpoint URL: {}", err)), err)
    }
}

/// Sanitize an error message so credentials never reach logs.
///
/// Transport errors carry the request URL, and the token request embeds the
/// client secret in its query string.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let credential_pattern =
        regex_lite::Regex::new(r"(client_secret|client_id|access_token)=[^&\s\x22]+").unwrap();
    let mut sanitized = credential_pattern
        .replace_all(message, "$1=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        sanitized.truncate(MAX_LENGTH);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        let err = Error::new(ErrorKind::Transport("connection refused".into()));
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::Timeout);
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::NotFound("batch 42".into()));
        assert!(!err.is_retryable());

        let err = Error::new(ErrorKind::Http {
            operation: "get import status",
            status: 500,
        });
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_http_error_carries_operation_and_status() {
        let err = Error::new(ErrorKind::Http {
            operation: "create bulk import",
            status: 403,
        });
        assert_eq!(
            err.to_string(),
            "create bulk import: unexpected HTTP status 403"
        );
    }

    #[test]
    fn test_api_error_lists_all_reasons() {
        let err = Error::new(ErrorKind::Api {
            status: 200,
            reasons: vec![
                ApiError {
                    code: "1003".into(),
                    message: "Invalid data format".into(),
                },
                ApiError {
                    code: "612".into(),
                    message: "Invalid Content-Type".into(),
                },
            ],
        });

        let display = err.to_string();
        assert!(display.contains("1003: Invalid data format"));
        assert!(display.contains("612: Invalid Content-Type"));
    }

    #[test]
    fn test_sanitize_redacts_credentials() {
        let msg = "error sending request for url \
                   (https://x.mktorest.com/identity/oauth/token?grant_type=client_credentials\
                   &client_id=abc-123&client_secret=sup3rs3cret)";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("client_secret=[REDACTED]"));
        assert!(sanitized.contains("client_id=[REDACTED]"));
        assert!(!sanitized.contains("sup3rs3cret"));
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long = "x".repeat(600);
        let sanitized = sanitize_error_message(&long);
        assert!(sanitized.ends_with("...[truncated]"));
        assert!(sanitized.len() < 600);
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "connection refused";
        assert_eq!(sanitize_error_message(msg), msg);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Decode(_)));
        assert!(err.source.is_some());
    }
}
