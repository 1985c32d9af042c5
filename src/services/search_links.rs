//! Deep links and activation for captured searches.
//!
//! Builds the URL a history row points at and decides what happens when the
//! user clicks it, deferring to the host's stateful-URL subsystem when that
//! is switched on.

use std::rc::Rc;

use serde::Serialize;

/// Parameters handed to the stateful-URL subsystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatefulUrlParams {
    pub search: String,
}

/// The host's stateful-URL subsystem and shared search state.
pub trait SearchState {
    fn is_stateful_mode_enabled(&self) -> bool;
    fn build_stateful_url(&self, params: &StatefulUrlParams, fallback_hash: &str) -> String;
    /// Makes `raw_payload` the page's current search.
    fn update_current_search(&self, raw_payload: &str);
}

/// Host page navigation.
pub trait Navigator {
    /// Sets `location.hash` and reloads the page.
    fn reload_with_hash(&self, hash: &str);
}

/// Search state for pages without the stateful-URL subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashOnlyState;

impl SearchState for HashOnlyState {
    fn is_stateful_mode_enabled(&self) -> bool {
        false
    }

    fn build_stateful_url(&self, _params: &StatefulUrlParams, fallback_hash: &str) -> String {
        fallback_hash.to_string()
    }

    fn update_current_search(&self, _raw_payload: &str) {}
}

/// Modifier state of the click that activated a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
    pub middle_button: bool,
}

impl ClickModifiers {
    /// Whether the browser should handle the click itself (new tab/window).
    pub fn opens_elsewhere(&self) -> bool {
        self.ctrl || self.shift || self.meta || self.middle_button
    }
}

/// What activating a row ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The stateful-URL subsystem owns the link; nothing was done.
    DeferredToStatefulUrl,
    /// Current search updated; the browser follows the link itself.
    FollowLink,
    /// Current search updated and the page was reloaded on the search hash.
    Reloaded,
}

/// Hash route the host page uses to re-run a saved search.
pub fn search_hash(key: &str) -> String {
    format!("#search:research={}", key)
}

/// Builds deep links and performs row activation.
#[derive(Clone)]
pub struct SearchLinker {
    state: Rc<dyn SearchState>,
    navigator: Rc<dyn Navigator>,
    page_path: String,
}

impl SearchLinker {
    pub fn new(
        state: Rc<dyn SearchState>,
        navigator: Rc<dyn Navigator>,
        page_path: impl Into<String>,
    ) -> Self {
        Self {
            state,
            navigator,
            page_path: page_path.into(),
        }
    }

    /// Deep link for a search with the given key and raw payload.
    pub fn search_url(&self, key: &str, raw_payload: &str) -> String {
        let hash = search_hash(key);
        if self.state.is_stateful_mode_enabled() {
            let params = StatefulUrlParams {
                search: raw_payload.to_string(),
            };
            self.state.build_stateful_url(&params, &hash)
        } else {
            format!("{}{}", self.page_path, hash)
        }
    }

    /// Activates a captured search.
    pub fn activate(&self, key: &str, raw_payload: &str, click: ClickModifiers) -> Activation {
        if self.state.is_stateful_mode_enabled() {
            return Activation::DeferredToStatefulUrl;
        }

        self.state.update_current_search(raw_payload);

        if click.opens_elsewhere() {
            return Activation::FollowLink;
        }

        self.navigator.reload_with_hash(&search_hash(key));
        Activation::Reloaded
    }
}
