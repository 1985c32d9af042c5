use std::time::Duration;

/// Storage key the host page uses for its active saved search.
pub const WATCHED_STORAGE_KEY: &str = "savedSearch.0";

/// Upper bound on the recent-history list.
pub const MAX_HISTORY_LENGTH: usize = 100;

/// Longest stretch the renderer may run before yielding to the host.
pub const FRAME_BUDGET: Duration = Duration::from_millis(100);

/// Static configuration of one sidebar instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarConfig {
    pub watched_key: String,
    pub max_history_length: usize,
    pub frame_budget: Duration,
    /// `location.pathname + location.search` of the host page, used to
    /// build hash deep links when stateful URLs are off.
    pub page_path: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            watched_key: WATCHED_STORAGE_KEY.to_string(),
            max_history_length: MAX_HISTORY_LENGTH,
            frame_budget: FRAME_BUDGET,
            page_path: "/".to_string(),
        }
    }
}
