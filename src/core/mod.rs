//! Core functionality for the scorefeed client library

pub mod errors;
pub mod scheduler;
pub mod state;

pub use errors::{FeedError, FeedErrorType, Result};
