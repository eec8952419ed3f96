use thiserror::Error;

use crate::models::Validation;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stats API error: {0}")]
    StatsApi(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, resets in {0} seconds")]
    RateLimited(u64),

    #[error("Store error ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Failures of an upstream read that the caller recovers from locally.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::StatsApi(_)
                | Error::GitHubApi(_)
                | Error::RateLimited(_)
                | Error::Network(_)
                | Error::ParseError(_)
                | Error::Serialization(_)
                | Error::UserNotFound(_)
        )
    }
}

/// Outcome of a rejected write. Unlike read failures these always reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Please fill in the required fields: {}", .0.fields().join(", "))]
    Invalid(Validation),

    #[error("The server rejected the submission ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Could not reach the server: {0}")]
    Unreachable(String),
}

impl From<Error> for SubmissionError {
    fn from(err: Error) -> Self {
        match err {
            Error::Store { status, message } => SubmissionError::Rejected {
                status,
                reason: message,
            },
            other => SubmissionError::Unreachable(other.to_string()),
        }
    }
}
