use thiserror::Error;

/// Centralized error type for the MovieBox client.
#[derive(Debug, Error)]
pub enum MovieBoxError {
    /// The target URL cannot be split into path and query.
    #[error("malformed URL `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// A request body could not be serialized.
    #[error("request body encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The configured shared secret is not usable as an HMAC key.
    #[error("invalid shared secret: {0}")]
    InvalidSecret(String),

    /// Connection failure, timeout or unreadable response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body is not JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl MovieBoxError {
    pub fn malformed_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Creates a transport error from a reqwest error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Transport(format!("request timed out: {}", error));
        }
        Self::Transport(error.to_string())
    }

    /// True for every failure of the HTTP exchange itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for MovieBoxError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_reqwest(error)
    }
}

pub type Result<T> = std::result::Result<T, MovieBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(MovieBoxError::Transport("reset".into()).is_transport());
        assert!(MovieBoxError::http_status(502, "https://example.com").is_transport());
        assert!(!MovieBoxError::malformed_url("nope", "relative URL").is_transport());
        assert!(!MovieBoxError::InvalidResponse("not json".into()).is_transport());
    }

    #[test]
    fn test_display_messages() {
        let err = MovieBoxError::http_status(404, "https://api.example.com/x");
        assert_eq!(err.to_string(), "HTTP 404 for URL: https://api.example.com/x");

        let err = MovieBoxError::malformed_url("::", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "malformed URL `::`: relative URL without a base"
        );
    }
}
