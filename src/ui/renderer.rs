//! Incremental Renderer.
//!
//! Draws a list into its sidebar section one row at a time. After each row
//! the pass checks how long it has run since its last yield; once that
//! exceeds the frame budget it yields to the host before continuing, so a
//! 100-entry draw never holds the UI thread for much longer than one budget.
//!
//! Each section carries a generation counter. Starting a pass bumps it, and
//! a pass that wakes up to find a newer generation stops without touching
//! the surface again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::cabin_names::CabinNames;
use crate::services::canonicalizer::parse_search;
use crate::services::clock::HostClock;
use crate::services::localization_engine::{LocalizationEngine, LocalizationEngineTrait};
use crate::services::search_links::SearchLinker;
use crate::types::errors::LocaleError;
use crate::types::history::ListKind;
use crate::types::search::ParsedSearch;
use crate::ui::surface::{EntryRow, SidebarSurface};

/// Counters for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: usize,
    /// Stored entries whose payload no longer parses.
    pub skipped: usize,
    pub yields: usize,
    /// Longest run between two yield points.
    pub longest_slice: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Completed(RenderStats),
    /// A newer pass for the same section took over.
    Superseded,
    /// No pass was started because the sidebar is not active.
    Skipped,
}

impl RenderOutcome {
    pub fn stats(&self) -> Option<&RenderStats> {
        match self {
            RenderOutcome::Completed(stats) => Some(stats),
            RenderOutcome::Superseded | RenderOutcome::Skipped => None,
        }
    }
}

/// Link text for a search: legs as `origins-destinations`, then the cabin.
pub fn format_route_label(parsed: &ParsedSearch, cabins: &dyn CabinNames) -> String {
    let legs: Vec<String> = parsed
        .record
        .route
        .iter()
        .map(|leg| format!("{}-{}", leg.origin.join(","), leg.destination.join(",")))
        .collect();
    format!(
        "{} ({})",
        legs.join(" "),
        cabins.cabin_label(&parsed.record.cabin)
    )
}

pub struct IncrementalRenderer {
    manager: Rc<RefCell<HistoryManager>>,
    surface: Rc<RefCell<dyn SidebarSurface>>,
    linker: SearchLinker,
    cabins: Rc<dyn CabinNames>,
    clock: Rc<dyn HostClock>,
    locale: RefCell<Rc<LocalizationEngine>>,
    frame_budget: Duration,
    generations: [Cell<u64>; 2],
}

impl IncrementalRenderer {
    pub fn new(
        manager: Rc<RefCell<HistoryManager>>,
        surface: Rc<RefCell<dyn SidebarSurface>>,
        linker: SearchLinker,
        cabins: Rc<dyn CabinNames>,
        clock: Rc<dyn HostClock>,
        frame_budget: Duration,
    ) -> Result<Self, LocaleError> {
        Ok(Self {
            manager,
            surface,
            linker,
            cabins,
            clock,
            locale: RefCell::new(Rc::new(LocalizationEngine::new()?)),
            frame_budget,
            generations: [Cell::new(0), Cell::new(0)],
        })
    }

    /// Switches label language; unsupported languages fall back to English.
    pub fn set_language(&self, lang: &str) -> Result<(), LocaleError> {
        let engine = LocalizationEngine::for_language(lang)?;
        *self.locale.borrow_mut() = Rc::new(engine);
        Ok(())
    }

    /// Invalidates any in-flight pass for `list`.
    pub fn cancel(&self, list: ListKind) {
        self.begin(list);
    }

    pub fn cancel_all(&self) {
        for list in ListKind::ALL {
            self.cancel(list);
        }
    }

    fn begin(&self, list: ListKind) -> u64 {
        let counter = &self.generations[list.index()];
        let generation = counter.get().wrapping_add(1);
        counter.set(generation);
        generation
    }

    fn is_current(&self, list: ListKind, generation: u64) -> bool {
        self.generations[list.index()].get() == generation
    }

    /// Redraws one section from the list as it is now.
    pub async fn render_section(&self, list: ListKind) -> RenderOutcome {
        let generation = self.begin(list);
        let locale = Rc::clone(&*self.locale.borrow());

        let mut entries = self.manager.borrow().entries(list).to_vec();
        if list == ListKind::History {
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }

        self.surface.borrow_mut().clear_section(list);
        let mut stats = RenderStats::default();
        if entries.is_empty() {
            return RenderOutcome::Completed(stats);
        }

        let title_key = match list {
            ListKind::History => "sidebar.history",
            ListKind::Pins => "sidebar.pinned",
        };
        self.surface
            .borrow_mut()
            .append_heading(list, &locale.t(title_key, None));

        let pin_title = (list == ListKind::History).then(|| locale.t("sidebar.pin", None));
        let remove_title = locale.t("sidebar.remove", None);
        let wall_now = self.clock.wall_time();
        let mut last_label: Option<String> = None;
        let mut slice_start = self.clock.now();

        for entry in &entries {
            if !self.is_current(list, generation) {
                tracing::debug!(?list, rendered = stats.rendered, "render pass superseded");
                return RenderOutcome::Superseded;
            }

            let parsed = match parse_search(&entry.raw_payload) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(?list, error = %e, "skipping stored entry");
                    stats.skipped += 1;
                    continue;
                }
            };

            if list == ListKind::History {
                let label = locale.format_distance(entry.timestamp, wall_now);
                if last_label.as_deref() != Some(label.as_str()) {
                    self.surface.borrow_mut().append_time_label(list, &label);
                    last_label = Some(label);
                }
            }

            let href = self
                .manager
                .borrow_mut()
                .resolve_url(list, &parsed.record, &self.linker)
                .unwrap_or_else(|| self.linker.search_url(&parsed.key, &entry.raw_payload));

            let row = EntryRow {
                list,
                label: format_route_label(&parsed, self.cabins.as_ref()),
                href,
                record: parsed.record,
                pin_title: pin_title.clone(),
                remove_title: remove_title.clone(),
            };
            self.surface.borrow_mut().append_row(list, row);
            stats.rendered += 1;

            let slice = self.clock.now().duration_since(slice_start);
            if slice > self.frame_budget {
                stats.longest_slice = stats.longest_slice.max(slice);
                stats.yields += 1;
                tracing::trace!(?list, ?slice, "yielding to host");
                tokio::task::yield_now().await;
                slice_start = self.clock.now();
            }
        }

        if !self.is_current(list, generation) {
            return RenderOutcome::Superseded;
        }

        let tail = self.clock.now().duration_since(slice_start);
        stats.longest_slice = stats.longest_slice.max(tail);
        tracing::debug!(?list, rendered = stats.rendered, yields = stats.yields, "render pass done");
        RenderOutcome::Completed(stats)
    }
}
