//! Sidebar Controller for Flightmarks.
//!
//! Owns the sidebar's lifecycle (`Inactive -> Active -> TornDown`), wires the
//! storage interceptor to the history manager, and drives the renderer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::cabin_names::CabinNames;
use crate::services::canonicalizer::parse_search;
use crate::services::clock::HostClock;
use crate::services::search_links::{Activation, ClickModifiers, Navigator, SearchLinker, SearchState};
use crate::services::settings_engine::SettingsStore;
use crate::storage::interceptor::StorageInterceptor;
use crate::storage::observed::ObservedStorage;
use crate::types::config::SidebarConfig;
use crate::types::errors::{LocaleError, SidebarError};
use crate::types::history::ListKind;
use crate::types::search::SearchRecord;
use crate::ui::renderer::{IncrementalRenderer, RenderOutcome};
use crate::ui::surface::SidebarSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Inactive,
    Active,
    TornDown,
}

/// A click on one of the rendered rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    /// The row's link was clicked.
    Open {
        list: ListKind,
        record: SearchRecord,
        click: ClickModifiers,
    },
    /// The pin icon of a history row was clicked.
    Pin { record: SearchRecord },
    /// The remove icon was clicked.
    Remove { list: ListKind, record: SearchRecord },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The sidebar is not active or the row's entry is gone.
    Ignored,
    Opened(Activation),
    /// Pinned; carries the outcome of the pins redraw.
    Pinned(RenderOutcome),
    /// Removed; carries the outcome of the affected section's redraw.
    Removed(RenderOutcome),
}

/// Everything the sidebar needs from its host page.
pub struct SidebarHost {
    pub settings_store: Box<dyn SettingsStore>,
    pub surface: Rc<RefCell<dyn SidebarSurface>>,
    pub search_state: Rc<dyn SearchState>,
    pub navigator: Rc<dyn Navigator>,
    pub cabins: Rc<dyn CabinNames>,
    pub clock: Rc<dyn HostClock>,
}

pub struct Sidebar {
    state: Cell<SidebarState>,
    manager: Rc<RefCell<HistoryManager>>,
    renderer: IncrementalRenderer,
    interceptor: Rc<StorageInterceptor>,
    /// The interceptor stays registered for the page's lifetime once added.
    installed: Cell<bool>,
    surface: Rc<RefCell<dyn SidebarSurface>>,
    linker: SearchLinker,
}

impl Sidebar {
    pub fn new(config: SidebarConfig, host: SidebarHost) -> Result<Self, LocaleError> {
        let manager = Rc::new(RefCell::new(HistoryManager::with_capacity(
            host.settings_store,
            config.max_history_length,
        )));
        let linker = SearchLinker::new(host.search_state, host.navigator, config.page_path);
        let renderer = IncrementalRenderer::new(
            manager.clone(),
            host.surface.clone(),
            linker.clone(),
            host.cabins,
            host.clock.clone(),
            config.frame_budget,
        )?;
        let interceptor = Rc::new(StorageInterceptor::new(
            config.watched_key,
            manager.clone(),
            host.clock,
        ));

        Ok(Self {
            state: Cell::new(SidebarState::Inactive),
            manager,
            renderer,
            interceptor,
            installed: Cell::new(false),
            surface: host.surface,
            linker,
        })
    }

    pub fn state(&self) -> SidebarState {
        self.state.get()
    }

    /// Shared handle to the list manager, for read access by the host.
    pub fn manager(&self) -> Rc<RefCell<HistoryManager>> {
        self.manager.clone()
    }

    /// Brings the sidebar up.
    ///
    /// `storage` is `None` when the host has no persistent store; the sidebar
    /// then stays as it is. It also stays put when history is disabled in
    /// the user's settings. Otherwise the interceptor is registered (once),
    /// the container is attached hidden, both sections are drawn and the
    /// container is shown.
    pub async fn activate(
        &self,
        storage: Option<&ObservedStorage>,
    ) -> Result<SidebarState, SidebarError> {
        if self.state.get() == SidebarState::Active {
            return Ok(SidebarState::Active);
        }

        let storage = match storage {
            Some(storage) => storage,
            None => {
                tracing::info!("host storage unavailable, sidebar stays off");
                return Ok(self.state.get());
            }
        };

        let language = {
            let mut manager = self.manager.borrow_mut();
            manager.load()?;
            if !manager.is_recording_enabled() {
                tracing::info!("history disabled in settings");
                return Ok(self.state.get());
            }
            manager.settings().language.clone()
        };
        if let Err(e) = self.renderer.set_language(&language) {
            tracing::warn!(error = %e, "keeping previous label language");
        }

        if !self.installed.get() {
            storage.observe(self.interceptor.clone());
            self.installed.set(true);
            tracing::debug!(key = self.interceptor.watched_key(), "interceptor installed");
        }
        self.interceptor.set_active(true);
        self.state.set(SidebarState::Active);

        {
            let mut surface = self.surface.borrow_mut();
            surface.attach_container();
            surface.set_body_marker(true);
        }

        for list in [ListKind::Pins, ListKind::History] {
            self.render_until_complete(list).await;
        }

        // Teardown may have happened while the passes were yielding.
        if self.state.get() == SidebarState::Active {
            self.surface.borrow_mut().set_container_visible(true);
            tracing::info!("sidebar active");
        }
        Ok(self.state.get())
    }

    /// Redraws `list` until a pass gets through without being superseded,
    /// so the container is only shown over fully drawn sections. Gives up
    /// once the sidebar leaves `Active`.
    async fn render_until_complete(&self, list: ListKind) {
        while self.state.get() == SidebarState::Active {
            match self.renderer.render_section(list).await {
                RenderOutcome::Superseded => {
                    tracing::debug!(?list, "initial pass superseded, redrawing");
                }
                _ => break,
            }
        }
    }

    /// Redraws one section. Any pass already running for it is superseded.
    /// Nothing is drawn unless the sidebar is active.
    pub async fn refresh(&self, list: ListKind) -> RenderOutcome {
        if self.state.get() != SidebarState::Active {
            tracing::debug!(?list, state = ?self.state.get(), "sidebar inactive, skipping refresh");
            return RenderOutcome::Skipped;
        }
        self.renderer.render_section(list).await
    }

    /// Applies a row action and redraws the section it touched.
    pub async fn handle_action(&self, action: SidebarAction) -> Result<ActionOutcome, SidebarError> {
        if self.state.get() != SidebarState::Active {
            tracing::debug!(?action, "sidebar inactive, ignoring action");
            return Ok(ActionOutcome::Ignored);
        }

        match action {
            SidebarAction::Open {
                list,
                record,
                click,
            } => {
                let raw_payload = match self.manager.borrow().find(list, &record) {
                    Some(entry) => entry.raw_payload.clone(),
                    None => return Ok(ActionOutcome::Ignored),
                };
                let parsed = match parse_search(&raw_payload) {
                    Ok(parsed) => parsed,
                    Err(_) => return Ok(ActionOutcome::Ignored),
                };
                let activation = self.linker.activate(&parsed.key, &raw_payload, click);
                Ok(ActionOutcome::Opened(activation))
            }
            SidebarAction::Pin { record } => {
                let entry = match self.manager.borrow().find(ListKind::History, &record) {
                    Some(entry) => entry.clone(),
                    None => return Ok(ActionOutcome::Ignored),
                };
                self.manager.borrow_mut().pin(&entry)?;
                let outcome = self.renderer.render_section(ListKind::Pins).await;
                Ok(ActionOutcome::Pinned(outcome))
            }
            SidebarAction::Remove { list, record } => {
                let removed = self.manager.borrow_mut().remove(list, &record)?;
                if !removed {
                    return Ok(ActionOutcome::Ignored);
                }
                let outcome = self.renderer.render_section(list).await;
                Ok(ActionOutcome::Removed(outcome))
            }
        }
    }

    /// Takes the sidebar off the page. The interceptor stays registered with
    /// the storage but stops recording.
    pub fn teardown(&self) {
        self.renderer.cancel_all();
        self.interceptor.set_active(false);
        {
            let mut surface = self.surface.borrow_mut();
            surface.detach_container();
            surface.set_body_marker(false);
        }
        if self.state.get() == SidebarState::Active {
            self.state.set(SidebarState::TornDown);
            tracing::info!("sidebar torn down");
        }
    }
}
