//! Crate-level error type

use crate::api::error::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-2xx status
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unknown job type: {0}")]
    UnknownJobType(String),

    #[error("malformed job: {0}")]
    MalformedJob(String),

    #[error("invalid value {value:?} for filter '{key}': {reason}")]
    InvalidFilterValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Response body lacks the expected envelope key (`job`, `pods`, ...)
    #[error("response is missing the '{0}' field")]
    MissingField(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_filter(key: &str, value: &str, reason: impl Into<String>) -> Self {
        Error::InvalidFilterValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
