use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("invalid label pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid duration filter: {0}")]
    InvalidFilter(String),

    #[error("unknown time source: {0}")]
    UnknownTimeSource(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<regex::Error> for TimerError {
    fn from(err: regex::Error) -> Self {
        TimerError::InvalidPattern(err.to_string())
    }
}

impl From<strum::ParseError> for TimerError {
    fn from(err: strum::ParseError) -> Self {
        TimerError::UnknownTimeSource(err.to_string())
    }
}

impl From<serde_json::Error> for TimerError {
    fn from(err: serde_json::Error) -> Self {
        TimerError::Serialization(err.to_string())
    }
}
