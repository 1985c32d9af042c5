//! Property-based tests for history and pin list operations.
//!
//! These tests drive `HistoryManager` with arbitrary sequences of captured
//! searches and check the list invariants against a simple model.

use chrono::{DateTime, Duration, TimeZone, Utc};
use flightmarks::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use flightmarks::services::canonicalizer::canonicalize;
use flightmarks::services::settings_engine::MemorySettingsStore;
use flightmarks::types::history::ListKind;
use flightmarks::types::search::SearchRecord;
use flightmarks::types::settings::UserSettings;
use proptest::prelude::*;
use std::collections::HashSet;

const AIRPORTS: [&str; 4] = ["JFK", "LAX", "SFO", "ORD"];
const CABINS: [&str; 2] = ["COACH", "BUSINESS"];

/// A captured search drawn from a small identity space so duplicates are common.
#[derive(Debug, Clone)]
struct Capture {
    origin: usize,
    destination: usize,
    cabin: usize,
    token: u32,
}

fn arb_capture() -> impl Strategy<Value = Capture> {
    (0..AIRPORTS.len(), 0..AIRPORTS.len(), 0..CABINS.len(), any::<u32>()).prop_map(
        |(origin, destination, cabin, token)| Capture {
            origin,
            destination,
            cabin,
            token,
        },
    )
}

impl Capture {
    fn payload(&self) -> String {
        serde_json::json!({
            "1": format!("k{}", self.token),
            "3": {
                "7": [ { "3": [AIRPORTS[self.origin]], "5": [AIRPORTS[self.destination]] } ],
                "8": CABINS[self.cabin],
            },
            "12": self.token,
        })
        .to_string()
    }
}

fn ts(i: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(i as i64)
}

fn manager(cap: usize) -> HistoryManager {
    let store = MemorySettingsStore::new(UserSettings::default());
    HistoryManager::with_capacity(Box::new(store), cap)
}

/// Reference model: most recent first, one entry per identity, capped.
fn model(captures: &[Capture], cap: usize) -> Vec<(SearchRecord, DateTime<Utc>)> {
    let mut list: Vec<(SearchRecord, DateTime<Utc>)> = Vec::new();
    for (i, capture) in captures.iter().enumerate() {
        let record = canonicalize(&capture.payload()).unwrap();
        list.retain(|(r, _)| *r != record);
        list.insert(0, (record, ts(i)));
        list.truncate(cap);
    }
    list
}

// **Property 1: Upsert deduplicates by identity and keeps recency order**
//
// *For any* sequence of captures, the history list SHALL hold each identity
// at most once, carry the latest timestamp for it, and match the model order.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn upsert_matches_recency_model(
        captures in proptest::collection::vec(arb_capture(), 1..40),
        cap in 1usize..12,
    ) {
        let mut manager = manager(cap);
        for (i, capture) in captures.iter().enumerate() {
            manager.upsert(ListKind::History, &capture.payload(), ts(i)).unwrap();
        }

        let entries = manager.entries(ListKind::History);
        prop_assert!(entries.len() <= cap);

        let mut seen = HashSet::new();
        for entry in entries {
            let record = canonicalize(&entry.raw_payload).unwrap();
            prop_assert!(seen.insert(record), "duplicate identity in history");
        }

        let expected = model(&captures, cap);
        let actual: Vec<(SearchRecord, DateTime<Utc>)> = entries
            .iter()
            .map(|e| (canonicalize(&e.raw_payload).unwrap(), e.timestamp))
            .collect();
        prop_assert_eq!(actual, expected);

        let last = captures.last().unwrap();
        prop_assert_eq!(&entries[0].raw_payload, &last.payload());
    }
}

// **Property 2: Pins are independent of history eviction**
//
// *For any* sequence of captures with every one pinned, removing entries from
// history SHALL leave the pins untouched, and pins are never capped.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn pins_survive_history_changes(
        captures in proptest::collection::vec(arb_capture(), 1..30),
    ) {
        let mut manager = manager(2);
        for (i, capture) in captures.iter().enumerate() {
            manager.upsert(ListKind::History, &capture.payload(), ts(i)).unwrap();
            let entry = manager.entries(ListKind::History)[0].clone();
            manager.pin(&entry).unwrap();
        }

        let distinct: HashSet<SearchRecord> = captures
            .iter()
            .map(|c| canonicalize(&c.payload()).unwrap())
            .collect();
        prop_assert_eq!(manager.entries(ListKind::Pins).len(), distinct.len());

        let pins_before = manager.entries(ListKind::Pins).to_vec();
        for record in &distinct {
            manager.remove(ListKind::History, record).unwrap();
        }
        prop_assert!(manager.entries(ListKind::History).is_empty());
        prop_assert_eq!(manager.entries(ListKind::Pins), pins_before.as_slice());
    }
}

// **Property 3: Identity ignores the volatile field and the search key**
//
// *For any* two payloads that differ only in key and volatile field, the
// canonical identity SHALL be equal and the second upsert SHALL replace the first.
proptest! {
    #[test]
    fn volatile_fields_do_not_split_identity(
        capture in arb_capture(),
        other_token in any::<u32>(),
    ) {
        let again = Capture { token: other_token, ..capture.clone() };
        prop_assert_eq!(
            canonicalize(&capture.payload()).unwrap(),
            canonicalize(&again.payload()).unwrap()
        );

        let mut manager = manager(10);
        manager.upsert(ListKind::History, &capture.payload(), ts(0)).unwrap();
        manager.upsert(ListKind::History, &again.payload(), ts(1)).unwrap();
        let entries = manager.entries(ListKind::History);
        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(&entries[0].raw_payload, &again.payload());
        prop_assert_eq!(entries[0].timestamp, ts(1));
    }
}
