//! Property-based tests for frame-budget slicing in the incremental renderer.
//!
//! For arbitrary list sizes and per-row costs, a render pass draws every
//! entry and never runs past the budget by more than one row before yielding.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use flightmarks::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use flightmarks::services::cabin_names::ItaCabinNames;
use flightmarks::services::clock::ManualClock;
use flightmarks::services::search_links::{HashOnlyState, Navigator, SearchLinker};
use flightmarks::services::settings_engine::MemorySettingsStore;
use flightmarks::types::history::{HistoryEntry, ListKind};
use flightmarks::types::settings::UserSettings;
use flightmarks::ui::renderer::IncrementalRenderer;
use flightmarks::ui::surface::{EntryRow, RecordingSurface, SidebarSurface};
use proptest::prelude::*;

const BUDGET: Duration = Duration::from_millis(100);

struct NoNavigation;

impl Navigator for NoNavigation {
    fn reload_with_hash(&self, _hash: &str) {}
}

/// Surface whose rows advance the shared clock by a fixed cost.
struct CostlySurface {
    inner: RecordingSurface,
    clock: Rc<ManualClock>,
    row_cost: Duration,
}

impl SidebarSurface for CostlySurface {
    fn attach_container(&mut self) {
        self.inner.attach_container();
    }
    fn set_container_visible(&mut self, visible: bool) {
        self.inner.set_container_visible(visible);
    }
    fn detach_container(&mut self) {
        self.inner.detach_container();
    }
    fn set_body_marker(&mut self, present: bool) {
        self.inner.set_body_marker(present);
    }
    fn clear_section(&mut self, list: ListKind) {
        self.inner.clear_section(list);
    }
    fn append_heading(&mut self, list: ListKind, title: &str) {
        self.inner.append_heading(list, title);
    }
    fn append_time_label(&mut self, list: ListKind, label: &str) {
        self.inner.append_time_label(list, label);
    }
    fn append_row(&mut self, list: ListKind, row: EntryRow) {
        self.clock.advance(self.row_cost);
        self.inner.append_row(list, row);
    }
}

fn origin() -> DateTime<Utc> {
    "2024-06-15T12:00:00Z".parse().unwrap()
}

fn payload(index: usize) -> String {
    serde_json::json!({
        "1": format!("key{}", index),
        "3": { "7": [ { "3": [format!("A{:03}", index)], "5": ["ZZZ"] } ], "8": "FIRST" },
    })
    .to_string()
}

// **Property 1: Every entry is drawn within the frame budget**
//
// *For any* list of up to 100 entries and any per-row cost, the pass SHALL
// complete with every row drawn and no slice longer than budget plus one row.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn render_pass_stays_within_budget(
        count in 0usize..=100,
        cost_ms in 1u64..80,
        list in prop_oneof![Just(ListKind::History), Just(ListKind::Pins)],
    ) {
        let row_cost = Duration::from_millis(cost_ms);
        let mut settings = UserSettings::default();
        let entries: Vec<HistoryEntry> = (0..count)
            .map(|i| HistoryEntry::new(payload(i), origin() - chrono::Duration::minutes(i as i64)))
            .collect();
        *settings.list_mut(list) = entries;

        let mut manager = HistoryManager::new(Box::new(MemorySettingsStore::new(settings)));
        manager.load().unwrap();
        let manager = Rc::new(RefCell::new(manager));
        let clock = Rc::new(ManualClock::new(origin()));
        let surface = Rc::new(RefCell::new(CostlySurface {
            inner: RecordingSurface::new(),
            clock: clock.clone(),
            row_cost,
        }));
        let linker = SearchLinker::new(Rc::new(HashOnlyState), Rc::new(NoNavigation), "/");
        let renderer = IncrementalRenderer::new(
            manager,
            surface.clone(),
            linker,
            Rc::new(ItaCabinNames),
            clock,
            BUDGET,
        )
        .unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let outcome = runtime.block_on(renderer.render_section(list));

        let stats = *outcome.stats().unwrap();
        prop_assert_eq!(stats.rendered, count);
        prop_assert_eq!(stats.skipped, 0);
        prop_assert!(stats.longest_slice <= BUDGET + row_cost);
        prop_assert_eq!(surface.borrow().inner.rows(list).len(), count);
    }
}
