use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Interval, MissedTickBehavior, interval};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Admission gate shared by all workers.
///
/// A worker holds the lock while it waits for the next tick, so a tick is
/// only consumed by a worker that is ready to send. Ticks are never stored
/// up: with `MissedTickBehavior::Delay` a late caller passes at once and the
/// following tick is a full interval after it. The first admission is
/// immediate.
pub(super) struct Pacer {
    tick: Mutex<Interval>,
    issued: AtomicU64,
}

impl Pacer {
    pub(super) fn new(every: Duration) -> Self {
        let mut tick = interval(every.max(MIN_INTERVAL));
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            tick: Mutex::new(tick),
            issued: AtomicU64::new(0),
        }
    }

    /// Waits until the caller may start its next request.
    pub(super) async fn admit(&self) {
        let mut tick = self.tick.lock().await;
        tick.tick().await;
        self.issued.fetch_add(1, Ordering::AcqRel);
    }

    pub(super) fn issued(&self) -> u64 {
        self.issued.load(Ordering::Acquire)
    }
}
