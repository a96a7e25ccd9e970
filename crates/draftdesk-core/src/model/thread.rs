//! Per-thread memory kept by the backend agent.

use serde::{Deserialize, Serialize};

/// What the backend remembers about a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadMemory {
    /// Raw thread messages as reported by the backend.
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    /// Agent-written summary of the thread, if any.
    #[serde(default)]
    pub summary: Option<String>,
    /// Last action the agent took on the thread, if any.
    #[serde(default)]
    pub last_action: Option<String>,
}

impl ThreadMemory {
    /// Summary text, with blank summaries treated as absent.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
