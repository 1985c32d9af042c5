use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the two bounded lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Recently captured searches, most recent first.
    History,
    /// User-pinned searches, most recently pinned first.
    Pins,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::History, ListKind::Pins];

    /// Stable index used for per-list bookkeeping arrays.
    pub fn index(self) -> usize {
        match self {
            ListKind::History => 0,
            ListKind::Pins => 1,
        }
    }

    /// DOM id of the section element holding this list.
    pub fn section_id(self) -> &'static str {
        match self {
            ListKind::History => "pt-container-history",
            ListKind::Pins => "pt-container-pins",
        }
    }
}

/// A captured search as persisted in the user settings object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// The saved-search payload exactly as the host page wrote it.
    #[serde(rename = "savedSearch")]
    pub raw_payload: String,
    /// Deep link, computed on first render and cached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HistoryEntry {
    pub fn new(raw_payload: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            raw_payload: raw_payload.into(),
            url: None,
        }
    }
}
