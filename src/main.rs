//! Flightmarks: search history and pinned searches for flight-search pages.
//!
//! Console demo: wires the sidebar to in-memory host collaborators, replays a
//! few saved-search writes through the observed storage and prints what the
//! sidebar draws.

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use flightmarks::app::{Sidebar, SidebarAction, SidebarHost};
use flightmarks::managers::history_manager::HistoryManagerTrait;
use flightmarks::services::cabin_names::ItaCabinNames;
use flightmarks::services::canonicalizer::canonicalize;
use flightmarks::services::clock::SystemClock;
use flightmarks::services::search_links::{HashOnlyState, Navigator};
use flightmarks::services::settings_engine::MemorySettingsStore;
use flightmarks::storage::observed::{MemoryStorage, ObservedStorage};
use flightmarks::types::config::{SidebarConfig, WATCHED_STORAGE_KEY};
use flightmarks::types::history::ListKind;
use flightmarks::ui::surface::RecordingSurface;
use tracing_subscriber::EnvFilter;

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn reload_with_hash(&self, hash: &str) {
        println!("  [NAV] reload {}", hash);
    }
}

fn saved_search(key: &str, from: &str, to: &str, cabin: &str, token: &str) -> String {
    serde_json::json!({
        "1": key,
        "3": { "7": [ { "3": [from], "5": [to] } ], "8": cabin },
        "12": token,
    })
    .to_string()
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_surface(surface: &RecordingSurface) {
    for line in surface.render_text().lines() {
        println!("  {}", line);
    }
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Flightmarks v{} - Demo Mode                 ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let store = MemorySettingsStore::default();
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    let config = SidebarConfig {
        page_path: "/search".to_string(),
        ..SidebarConfig::default()
    };
    let sidebar = Sidebar::new(
        config,
        SidebarHost {
            settings_store: Box::new(store.clone()),
            surface: surface.clone(),
            search_state: Rc::new(HashOnlyState),
            navigator: Rc::new(ConsoleNavigator),
            cabins: Rc::new(ItaCabinNames),
            clock: Rc::new(SystemClock),
        },
    )?;
    let storage = ObservedStorage::new(Box::new(MemoryStorage::new()));

    section("Activation");
    let state = sidebar.activate(Some(&storage)).await?;
    println!("  State: {:?}, visible: {}", state, surface.borrow().is_visible());
    println!();

    section("Intercepted writes");
    let a = saved_search("a1", "JFK", "LAX", "COACH", "t1");
    let a_again = saved_search("a1", "JFK", "LAX", "COACH", "t2");
    let b = saved_search("b1", "LHR", "CDG", "BUSINESS", "t3");
    storage.set_item(WATCHED_STORAGE_KEY, &a)?;
    storage.set_item(WATCHED_STORAGE_KEY, &a_again)?;
    storage.set_item(WATCHED_STORAGE_KEY, &b)?;
    storage.set_item("unrelated", "ignored")?;
    storage.set_item(WATCHED_STORAGE_KEY, "not json")?;
    println!(
        "  History entries: {} (saves: {})",
        sidebar.manager().borrow().entries(ListKind::History).len(),
        store.save_count()
    );
    sidebar.refresh(ListKind::History).await;
    print_surface(&surface.borrow());

    section("Row actions");
    let record_b = canonicalize(&b)?;
    let record_a = canonicalize(&a_again)?;
    let removed = sidebar
        .handle_action(SidebarAction::Remove {
            list: ListKind::History,
            record: record_b,
        })
        .await?;
    println!("  Remove B: {:?}", removed);
    let pinned = sidebar
        .handle_action(SidebarAction::Pin {
            record: record_a.clone(),
        })
        .await?;
    println!("  Pin A: {:?}", pinned);
    let opened = sidebar
        .handle_action(SidebarAction::Open {
            list: ListKind::Pins,
            record: record_a,
            click: Default::default(),
        })
        .await?;
    println!("  Open A: {:?}", opened);
    print_surface(&surface.borrow());

    section("Teardown");
    sidebar.teardown();
    println!(
        "  State: {:?}, attached: {}, body marker: {}",
        sidebar.state(),
        surface.borrow().is_attached(),
        surface.borrow().has_body_marker()
    );
    println!("  Persisted: {}", serde_json::to_string_pretty(&store.snapshot())?);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Demo finished");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}
