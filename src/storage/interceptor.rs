//! Storage Write Interceptor.
//!
//! Watches the host page's active-saved-search slot and records every value
//! written there into the history list.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::clock::HostClock;
use crate::storage::observed::StorageObserver;
use crate::types::errors::HistoryError;
use crate::types::history::ListKind;

pub struct StorageInterceptor {
    watched_key: String,
    manager: Rc<RefCell<HistoryManager>>,
    clock: Rc<dyn HostClock>,
    /// Writes seen while inactive are forwarded by the storage but not recorded.
    active: Cell<bool>,
}

impl StorageInterceptor {
    pub fn new(
        watched_key: impl Into<String>,
        manager: Rc<RefCell<HistoryManager>>,
        clock: Rc<dyn HostClock>,
    ) -> Self {
        Self {
            watched_key: watched_key.into(),
            manager,
            clock,
            active: Cell::new(false),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn watched_key(&self) -> &str {
        &self.watched_key
    }
}

impl StorageObserver for StorageInterceptor {
    /// Malformed payloads are dropped silently; persistence failures are
    /// returned to the storage, which logs them.
    fn on_write(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        if key != self.watched_key || !self.active.get() {
            return Ok(());
        }

        let timestamp = self.clock.wall_time();
        match self
            .manager
            .borrow_mut()
            .upsert(ListKind::History, value, timestamp)
        {
            Err(HistoryError::Malformed(e)) => {
                tracing::debug!(error = %e, "ignoring saved search write");
                Ok(())
            }
            other => other,
        }
    }
}
