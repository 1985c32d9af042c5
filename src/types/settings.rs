use serde::{Deserialize, Serialize};

use super::history::{HistoryEntry, ListKind};

/// The slice of the extension's user settings this crate reads and writes.
///
/// Field names follow the host extension's settings object so the same
/// JSON document can be shared with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default = "default_enable_history")]
    pub enable_history: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub pins: Vec<HistoryEntry>,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_enable_history() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            enable_history: default_enable_history(),
            history: Vec::new(),
            pins: Vec::new(),
            language: default_language(),
        }
    }
}

impl UserSettings {
    pub fn list(&self, kind: ListKind) -> &[HistoryEntry] {
        match kind {
            ListKind::History => &self.history,
            ListKind::Pins => &self.pins,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<HistoryEntry> {
        match kind {
            ListKind::History => &mut self.history,
            ListKind::Pins => &mut self.pins,
        }
    }
}
