use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classifies the failures a live-feed client can encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedErrorType {
    /// An unknown error occurred
    Unknown,
    /// The transport session failed or closed abnormally
    Transport,
    /// Received update payload could not be parsed
    InvalidMessage,
}

/// Unified error type for everything that can go wrong while consuming
/// the update feed.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct FeedError {
    /// Type of the error
    pub error_type: FeedErrorType,
    /// Detailed error message
    pub message: String,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.error_type, self.message)
    }
}

/// Type alias for common Result type used throughout the library
pub type Result<T> = std::result::Result<T, FeedError>;

/// Callback type for error listeners
pub type ErrorListener = Box<dyn Fn(&FeedError) + Send + Sync>;

impl FeedError {
    /// Creates a new FeedError with the given type and message
    pub fn new(error_type: FeedErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError {
            error_type: FeedErrorType::InvalidMessage,
            message: err.to_string(),
        }
    }
}
