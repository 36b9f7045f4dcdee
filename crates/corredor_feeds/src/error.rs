use corredor_routing::error::{FeedError, GeocodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: u16 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl From<FeedClientError> for FeedError {
    fn from(error: FeedClientError) -> Self {
        match error {
            FeedClientError::Feed(error) => error,
            FeedClientError::Api { status } => FeedError::Status(status),
            FeedClientError::Csv(error) => FeedError::Malformed {
                line: error.position().map_or(0, |p| p.line() as usize),
                reason: error.to_string(),
            },
            FeedClientError::Request(error) if error.is_timeout() => {
                FeedError::Request(format!("timed out: {error}"))
            }
            FeedClientError::Request(error) => FeedError::Request(error.to_string()),
        }
    }
}

impl From<FeedClientError> for GeocodeError {
    fn from(error: FeedClientError) -> Self {
        match error {
            FeedClientError::Request(error) if error.is_timeout() => GeocodeError::Timeout,
            error => GeocodeError::Request(error.to_string()),
        }
    }
}
