use thiserror::Error;

/// Failure taxonomy of the feed pipeline.
///
/// Created only inside the feed module; the caller matches on
/// [`FeedError::kind`] to pick empty-state or error-state UI.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection failure or non-2xx HTTP status.
    #[error("network error: {message}")]
    Network {
        message: String,
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Request exceeded its deadline or was cancelled by the caller.
    #[error("timed out: {message}")]
    Timeout { message: String },

    /// The feed document is malformed or not RSS.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Anything not classified, wrapping the original cause.
    #[error("unexpected error: {message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    Network,
    Timeout,
    Parse,
    Unknown,
}

impl FeedError {
    pub fn kind(&self) -> FeedErrorKind {
        match self {
            FeedError::Network { .. } => FeedErrorKind::Network,
            FeedError::Timeout { .. } => FeedErrorKind::Timeout,
            FeedError::Parse { .. } => FeedErrorKind::Parse,
            FeedError::Unknown { .. } => FeedErrorKind::Unknown,
        }
    }

    pub fn network(message: impl Into<String>, status: Option<u16>) -> Self {
        FeedError::Network {
            message: message.into(),
            status,
            source: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        FeedError::Parse {
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        FeedError::Timeout {
            message: "fetch cancelled by caller".into(),
        }
    }
}

/// Classify transport-level errors into the taxonomy. Timeouts reported by
/// reqwest become TIMEOUT, status and connection problems become NETWORK,
/// everything else is wrapped UNKNOWN.
impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_status() || err.is_connect() || err.is_request() {
            FeedError::Network {
                message: err.to_string(),
                status: err.status().map(|s| s.as_u16()),
                source: Some(err),
            }
        } else {
            FeedError::Unknown {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            FeedError::network("boom", Some(500)).kind(),
            FeedErrorKind::Network
        );
        assert_eq!(FeedError::parse("bad xml").kind(), FeedErrorKind::Parse);
        assert_eq!(FeedError::cancelled().kind(), FeedErrorKind::Timeout);
    }

    #[test]
    fn test_network_carries_status() {
        match FeedError::network("HTTP 503", Some(503)) {
            FeedError::Network { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_display_includes_message() {
        let err = FeedError::parse("unexpected end of document");
        assert!(err.to_string().contains("unexpected end of document"));
    }
}
