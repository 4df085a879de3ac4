use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Offline data error: {0}")]
    Offline(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl Error {
    /// Transient failures worth another attempt against the same upstream.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Status { status } => *status == 429 || (500..600).contains(status),
            Error::Timeout(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
