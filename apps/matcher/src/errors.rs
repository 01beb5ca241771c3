use thiserror::Error;

/// Matcher-level error type.
///
/// Only the seams that can genuinely fail (extraction backends, embedding backends,
/// configuration) return it. The public pipeline entry points absorb these errors into
/// degraded results so one bad document never aborts a batch.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding API error (status {status}): {message}")]
    EmbeddingApi { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl MatchError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MatchError::EmbeddingApi { status, .. } => *status == 429 || *status >= 500,
            MatchError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_transient() {
        let err = MatchError::EmbeddingApi {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_error_is_not_transient() {
        let err = MatchError::EmbeddingApi {
            status: 400,
            message: "bad input".to_string(),
        };
        assert!(!err.is_transient());
        assert!(!MatchError::Config("x".into()).is_transient());
    }

    #[test]
    fn test_internal_error_wraps_anyhow() {
        let err: MatchError = anyhow::anyhow!("extraction task panicked").into();
        assert_eq!(err.to_string(), "Internal error: extraction task panicked");
        assert!(!err.is_transient());
    }
}
