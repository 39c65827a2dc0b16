use reqwest::StatusCode;
use thiserror::Error;

use crate::services::validation::ValidationErrors;

/// Failure talking to the salon API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Outcome of a failed save
#[derive(Error, Debug)]
pub enum SaveError {
    /// The server rejected one or more fields (HTTP 422)
    #[error("server rejected {} field(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("save failed: {0}")]
    Transport(#[from] ApiError),
}

impl From<reqwest::Error> for SaveError {
    fn from(err: reqwest::Error) -> Self {
        SaveError::Transport(ApiError::Http(err))
    }
}

/// Errors raised while editing a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("invalid salon API URL: {0}")]
    ApiUrl(String),
}
