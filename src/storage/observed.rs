//! Observed key-value storage.
//!
//! `ObservedStorage` stands in front of the host's store: every write goes to
//! the real store first, unchanged, and only after it succeeds are the
//! registered observers told about it. Observer failures are logged and
//! never leak back into the host's write.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::errors::{HistoryError, StorageError};

/// The host page's persistent key-value store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str);
}

/// Receives every successful write made through an `ObservedStorage`.
pub trait StorageObserver {
    fn on_write(&self, key: &str, value: &str) -> Result<(), HistoryError>;
}

/// HashMap-backed store with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would push the stored keys and values past
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::WriteRejected {
                    key: key.to_string(),
                    reason: format!("quota of {} bytes exceeded", quota),
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Decorator over the host store that notifies observers after each write.
pub struct ObservedStorage {
    inner: RefCell<Box<dyn KeyValueStore>>,
    observers: RefCell<Vec<Rc<dyn StorageObserver>>>,
}

impl ObservedStorage {
    pub fn new(inner: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: RefCell::new(inner),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn observe(&self, observer: Rc<dyn StorageObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.inner.borrow().get_item(key)
    }

    /// Forwards the write to the host store, then notifies observers.
    ///
    /// The host's result is returned as-is; a rejected write is not observed.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().set_item(key, value)?;

        // Observers may write back through this storage.
        let observers: Vec<Rc<dyn StorageObserver>> = self.observers.borrow().clone();
        for observer in observers {
            if let Err(e) = observer.on_write(key, value) {
                tracing::warn!(key, error = %e, "storage observer failed");
            }
        }
        Ok(())
    }

    pub fn remove_item(&self, key: &str) {
        self.inner.borrow_mut().remove_item(key);
    }
}
