//! Render sink: where parsed updates go.
//!
//! Setting text on a keyed element is the client's only side effect on its
//! environment. The sink is a trait so the display surface stays pluggable;
//! [`TextPanel`] is an in-memory implementation that keeps the last text
//! written per key.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Receives display-text updates addressed by element key.
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// Set the text content of the element addressed by `key`.
    async fn set_text(&self, key: &str, text: &str);
}

/// In-memory render surface holding the last text written per key.
#[derive(Debug, Default, Clone)]
pub struct TextPanel {
    cells: Arc<RwLock<HashMap<String, String>>>,
}

impl TextPanel {
    /// Create an empty panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current text for `key`, if any was ever written
    pub async fn text(&self, key: &str) -> Option<String> {
        self.cells.read().await.get(key).cloned()
    }

    /// Number of keys that have been written
    pub async fn len(&self) -> usize {
        self.cells.read().await.len()
    }

    /// True if nothing has been written yet
    pub async fn is_empty(&self) -> bool {
        self.cells.read().await.is_empty()
    }
}

#[async_trait]
impl RenderSink for TextPanel {
    async fn set_text(&self, key: &str, text: &str) {
        self.cells
            .write()
            .await
            .insert(key.to_string(), text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_read_text() {
        let panel = TextPanel::new();
        assert!(panel.is_empty().await);

        panel.set_text("s0p0", "05").await;
        assert_eq!(panel.text("s0p0").await.as_deref(), Some("05"));
        assert_eq!(panel.text("s0p1").await, None);
        assert_eq!(panel.len().await, 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let panel = TextPanel::new();

        panel.set_text("s7p3", "41").await;
        panel.set_text("s7p3", "42").await;

        assert_eq!(panel.text("s7p3").await.as_deref(), Some("42"));
        assert_eq!(panel.len().await, 1);
    }
}
