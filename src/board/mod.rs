//! Scoreboard update model: the wire types pushed by the server and the
//! render-target key synthesis.

pub mod messages;

pub use messages::{element_key, BoardUpdate, PlayerEntry};
