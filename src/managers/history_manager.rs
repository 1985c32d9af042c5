//! History Manager for Flightmarks.
//!
//! Implements `HistoryManagerTrait`: identity-keyed upsert, pinning, removal
//! and lazy deep-link resolution over the `history` and `pins` lists, backed
//! by a `SettingsStore` that is saved after every mutation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::services::canonicalizer::{canonicalize, parse_search};
use crate::services::search_links::SearchLinker;
use crate::services::settings_engine::SettingsStore;
use crate::types::config::MAX_HISTORY_LENGTH;
use crate::types::errors::{CanonicalizeError, HistoryError, SettingsError};
use crate::types::history::{HistoryEntry, ListKind};
use crate::types::search::SearchRecord;
use crate::types::settings::UserSettings;

/// Trait defining history and pin list operations.
pub trait HistoryManagerTrait {
    fn load(&mut self) -> Result<&UserSettings, SettingsError>;
    fn entries(&self, kind: ListKind) -> &[HistoryEntry];
    fn find(&self, kind: ListKind, record: &SearchRecord) -> Option<&HistoryEntry>;
    fn upsert(
        &mut self,
        kind: ListKind,
        raw_payload: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), HistoryError>;
    fn pin(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError>;
    fn remove(&mut self, kind: ListKind, record: &SearchRecord) -> Result<bool, HistoryError>;
    fn resolve_url(
        &mut self,
        kind: ListKind,
        record: &SearchRecord,
        linker: &SearchLinker,
    ) -> Option<String>;
    fn is_recording_enabled(&self) -> bool;
}

/// Owner of the persisted settings object and its two lists.
pub struct HistoryManager {
    settings: UserSettings,
    store: Box<dyn SettingsStore>,
    max_history_length: usize,
}

impl HistoryManager {
    /// Creates a manager with default (empty) settings; call `load` to read
    /// the persisted lists.
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self::with_capacity(store, MAX_HISTORY_LENGTH)
    }

    pub fn with_capacity(store: Box<dyn SettingsStore>, max_history_length: usize) -> Self {
        Self {
            settings: UserSettings::default(),
            store,
            max_history_length,
        }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    fn position(&self, kind: ListKind, record: &SearchRecord) -> Option<usize> {
        self.settings
            .list(kind)
            .iter()
            .position(|entry| matches_record(entry, record))
    }

    /// Drops any entry sharing `record`'s identity, puts `entry` in front and
    /// enforces the history cap.
    fn upsert_entry(&mut self, kind: ListKind, record: &SearchRecord, entry: HistoryEntry) {
        let cap = self.max_history_length;
        let list = self.settings.list_mut(kind);
        list.retain(|existing| !matches_record(existing, record));
        list.insert(0, entry);

        if kind == ListKind::History && list.len() > cap {
            let evicted = list.len() - cap;
            list.truncate(cap);
            tracing::debug!(evicted, "history cap reached");
        }
    }

    /// Restores the list invariants on freshly loaded settings: one entry
    /// per identity (first occurrence wins) and history within the cap.
    /// Entries that no longer parse are kept; the renderer skips them.
    fn normalize(&mut self) {
        let cap = self.max_history_length;
        for kind in ListKind::ALL {
            let list = self.settings.list_mut(kind);
            let before = list.len();
            let mut seen = HashSet::new();
            list.retain(|entry| match canonicalize(&entry.raw_payload) {
                Ok(record) => seen.insert(record),
                Err(_) => true,
            });
            if kind == ListKind::History {
                list.truncate(cap);
            }
            if list.len() != before {
                tracing::debug!(?kind, dropped = before - list.len(), "normalized stored list");
            }
        }
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        self.store.save(&self.settings)?;
        Ok(())
    }
}

/// Entries whose stored payload no longer parses never match anything.
fn matches_record(entry: &HistoryEntry, record: &SearchRecord) -> bool {
    canonicalize(&entry.raw_payload)
        .map(|existing| existing == *record)
        .unwrap_or(false)
}

/// Computes and caches `entry.url` if it is unset. Idempotent.
pub fn resolve_entry_url(
    entry: &mut HistoryEntry,
    linker: &SearchLinker,
) -> Result<String, CanonicalizeError> {
    if let Some(url) = &entry.url {
        return Ok(url.clone());
    }
    let parsed = parse_search(&entry.raw_payload)?;
    let url = linker.search_url(&parsed.key, &entry.raw_payload);
    entry.url = Some(url.clone());
    Ok(url)
}

impl HistoryManagerTrait for HistoryManager {
    /// Replaces the in-memory settings with the persisted ones.
    fn load(&mut self) -> Result<&UserSettings, SettingsError> {
        self.settings = self.store.load()?;
        self.normalize();
        tracing::debug!(
            history = self.settings.history.len(),
            pins = self.settings.pins.len(),
            "settings loaded"
        );
        Ok(&self.settings)
    }

    fn entries(&self, kind: ListKind) -> &[HistoryEntry] {
        self.settings.list(kind)
    }

    fn find(&self, kind: ListKind, record: &SearchRecord) -> Option<&HistoryEntry> {
        self.position(kind, record)
            .map(|index| &self.settings.list(kind)[index])
    }

    /// Inserts a payload at the front of `kind`, replacing any entry with the
    /// same canonical identity, then saves.
    fn upsert(
        &mut self,
        kind: ListKind,
        raw_payload: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), HistoryError> {
        let record = canonicalize(raw_payload)?;
        self.upsert_entry(kind, &record, HistoryEntry::new(raw_payload, timestamp));
        self.persist()
    }

    /// Copies `entry` to the front of `pins`. History is left untouched.
    fn pin(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        let record = canonicalize(&entry.raw_payload)?;
        self.upsert_entry(ListKind::Pins, &record, entry.clone());
        self.persist()
    }

    /// Removes the entry matching `record`. Returns `false` (and skips the
    /// save) when nothing matched.
    fn remove(&mut self, kind: ListKind, record: &SearchRecord) -> Result<bool, HistoryError> {
        match self.position(kind, record) {
            Some(index) => {
                self.settings.list_mut(kind).remove(index);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the cached deep link for the matching entry, computing it on
    /// first use.
    fn resolve_url(
        &mut self,
        kind: ListKind,
        record: &SearchRecord,
        linker: &SearchLinker,
    ) -> Option<String> {
        let index = self.position(kind, record)?;
        let entry = &mut self.settings.list_mut(kind)[index];
        resolve_entry_url(entry, linker).ok()
    }

    fn is_recording_enabled(&self) -> bool {
        self.settings.enable_history
    }
}
