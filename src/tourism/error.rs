use thiserror::Error;

/// Failures talking to the tourism provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit error: {0}")]
    RateLimited(String),

    /// The envelope header carried a non-success result code
    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
