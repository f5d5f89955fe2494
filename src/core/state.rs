//! Connection lifecycle types.
//!
//! The client cycles through three states for the lifetime of its host:
//!
//! - [`ConnectionState::Connecting`] while a connection attempt is in flight,
//! - [`ConnectionState::Open`] once the transport session is established,
//! - [`ConnectionState::Closed`] after a failure, while the retry timer runs.
//!
//! There is no terminal state; a closed connection is always retried.
use std::fmt;

/// Connection state of the live-feed client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A connection attempt is in progress. Entered at construction and
    /// again after every retry delay elapses.
    Connecting,
    /// The connection to the update endpoint is established and updates
    /// are flowing.
    Open,
    /// The connection was lost. A reconnect is pending; this state lasts
    /// no longer than the configured retry delay.
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "CONNECTING"),
            ConnectionState::Open => write!(f, "OPEN"),
            ConnectionState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Callback type for connection state changes, called with (new, old).
pub type ConnectionStateChangeListener =
    Box<dyn Fn(&ConnectionState, &ConnectionState) + Send + Sync>;
