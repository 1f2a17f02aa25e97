use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during one exchange with the analysis
/// endpoint. All variants are caught at the coordinator boundary and
/// surfaced to the operator through a single SYSTEM transcript entry.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("analysis endpoint returned status {0}")]
    Status(StatusCode),
    #[error("malformed analysis response: {0}")]
    Malformed(String),
    #[error("analysis backend unavailable")]
    Unavailable,
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::Transport(err.to_string())
    }
}
