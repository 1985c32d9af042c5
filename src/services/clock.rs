//! Time sources for the sidebar.
//!
//! The renderer measures its frame budget against a monotonic instant, while
//! captured searches and relative-time labels use wall-clock time.

use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

pub trait HostClock {
    /// Monotonic time used for frame-budget accounting.
    fn now(&self) -> Instant;
    /// Wall-clock time used for entry timestamps and labels.
    fn wall_time(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl HostClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Both readings advance together.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
    wall_origin: DateTime<Utc>,
}

impl ManualClock {
    pub fn new(wall_origin: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            wall_origin,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl HostClock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        // chrono::Duration::from_std only fails past ~292 billion years.
        let elapsed = chrono::Duration::from_std(self.elapsed.get()).unwrap_or_default();
        self.wall_origin + elapsed
    }
}
