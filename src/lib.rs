//! scorefeed: a resilient live-feed client for scoreboard displays
//!
//! This library maintains a single WebSocket connection to a scoreboard
//! update endpoint, routes parsed updates to a render sink, and recovers
//! the connection on any failure with a fixed-delay retry that never
//! gives up.

#![allow(missing_docs)]

use tracing;

pub mod board;
pub mod core;
pub mod render;
pub mod websocket_client;

/// Initialize the library with default configuration
///
/// Installs a default tracing subscriber. Call once at startup.
pub fn init() {
    tracing_subscriber::fmt::init();
    tracing::info!("scorefeed initialized");
}

// Re-export main types for convenient usage
pub use crate::board::messages::{element_key, BoardUpdate, PlayerEntry};
pub use crate::core::errors::{ErrorListener, FeedError, FeedErrorType, Result};
pub use crate::core::state::{ConnectionState, ConnectionStateChangeListener};
pub use crate::render::{RenderSink, TextPanel};
pub use crate::websocket_client::{
    FeedClientConfig, FeedLogLevel, LiveFeedClient, WebSocketConnector,
};
