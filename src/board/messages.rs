//! Wire types for scoreboard update frames.
//!
//! The server pushes one JSON text frame per change (and one full snapshot
//! right after connect). A frame carries the board identifier and the
//! current display text for every player on that board. Frames are consumed
//! immediately on receipt and never stored; within one key, the last write
//! wins.

use serde::{Deserialize, Serialize};

/// A single scored participant within one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Player identifier, unique within the board
    pub pid: u32,
    /// Raw numeric score. Present on the wire but not used for rendering;
    /// the server pre-formats `str` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Display text for this player (zero-padded by the server)
    #[serde(rename = "str")]
    pub display: String,
}

/// One update frame: a board and the entries to repaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Scoreboard identifier
    pub sbid: u32,
    /// Entries to repaint, in server order
    pub players: Vec<PlayerEntry>,
}

/// Synthesize the render-target key for a player's score element.
///
/// Board 7, player 3 maps to `"s7p3"`.
pub fn element_key(sbid: u32, pid: u32) -> String {
    format!("s{}p{}", sbid, pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_key() {
        assert_eq!(element_key(7, 3), "s7p3");
        assert_eq!(element_key(0, 0), "s0p0");
        assert_eq!(element_key(12, 40), "s12p40");
    }

    #[test]
    fn test_update_deserialization() {
        let json = r#"{"sbid": 7, "players": [{"pid": 3, "str": "42"}]}"#;

        let update: BoardUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.sbid, 7);
        assert_eq!(update.players.len(), 1);
        assert_eq!(update.players[0].pid, 3);
        assert_eq!(update.players[0].display, "42");
        assert_eq!(update.players[0].score, None);
    }

    #[test]
    fn test_update_deserialization_with_score() {
        let json = r#"{
            "sbid": 0,
            "players": [
                {"pid": 0, "score": 5, "str": "05"},
                {"pid": 1, "score": 12, "str": "12"}
            ]
        }"#;

        let update: BoardUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.players.len(), 2);
        assert_eq!(update.players[0].score, Some(5));
        assert_eq!(update.players[0].display, "05");
        assert_eq!(update.players[1].pid, 1);
        assert_eq!(update.players[1].display, "12");
    }

    #[test]
    fn test_update_serialization() {
        let update = BoardUpdate {
            sbid: 1,
            players: vec![PlayerEntry {
                pid: 5,
                score: None,
                display: "100".to_string(),
            }],
        };

        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"sbid\":1"));
        assert!(json.contains("\"pid\":5"));
        assert!(json.contains("\"str\":\"100\""));
        assert!(!json.contains("score"));
    }

    #[test]
    fn test_malformed_update() {
        assert!(serde_json::from_str::<BoardUpdate>("not json").is_err());
        assert!(serde_json::from_str::<BoardUpdate>(r#"{"sbid": 1}"#).is_err());
        assert!(serde_json::from_str::<BoardUpdate>(r#"{"players": []}"#).is_err());
    }
}
