pub mod client;
pub mod config;
pub mod connector;

pub use client::LiveFeedClient;
pub use config::{FeedClientConfig, FeedLogLevel};
pub use connector::WebSocketConnector;
