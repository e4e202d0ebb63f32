use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use super::{CandidateSet, Selector};

pub const DEFAULT_RECOVERY_WINDOW: Duration = Duration::from_secs(1);

type Quarantine = Arc<RwLock<HashMap<IpAddr, Instant>>>;

/// Round robin restricted to healthy IPs.
///
/// A failed IP is skipped until `recovery_window` has passed since its most
/// recent failure report. When every IP is quarantined the whole set is used
/// again so selection never starves.
pub struct RoundRobinSelector {
    candidates: CandidateSet,
    counter: AtomicUsize,
    quarantine: Quarantine,
    recovery_window: Duration,
}

impl RoundRobinSelector {
    #[must_use]
    pub fn new(candidates: CandidateSet) -> Self {
        Self::with_recovery_window(candidates, DEFAULT_RECOVERY_WINDOW)
    }

    #[must_use]
    pub fn with_recovery_window(candidates: CandidateSet, recovery_window: Duration) -> Self {
        let recovery_window = if recovery_window.is_zero() {
            DEFAULT_RECOVERY_WINDOW
        } else {
            recovery_window
        };
        Self {
            candidates,
            counter: AtomicUsize::new(0),
            quarantine: Arc::new(RwLock::new(HashMap::new())),
            recovery_window,
        }
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub const fn recovery_window(&self) -> Duration {
        self.recovery_window
    }

    fn is_quarantined(
        &self,
        failures: &HashMap<IpAddr, Instant>,
        ip: &IpAddr,
        now: Instant,
    ) -> bool {
        failures.get(ip).is_some_and(|failed_at| {
            now.saturating_duration_since(*failed_at) < self.recovery_window
        })
    }
}

impl Selector for RoundRobinSelector {
    fn select_ip(&self) -> IpAddr {
        let failures = self.quarantine.read().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let index = self.counter.fetch_add(1, Ordering::Relaxed);

        let healthy: Vec<IpAddr> = self
            .candidates
            .iter()
            .filter(|ip| !self.is_quarantined(&failures, ip, now))
            .collect();
        let pool = if healthy.is_empty() {
            self.candidates.to_vec()
        } else {
            healthy
        };

        index
            .checked_rem(pool.len())
            .and_then(|position| pool.get(position).copied())
            .unwrap_or_else(|| self.candidates.first())
    }

    fn set_fail(&self, ip: IpAddr) {
        let failed_at = Instant::now();
        {
            let mut failures = self.quarantine.write().unwrap_or_else(PoisonError::into_inner);
            failures.insert(ip, failed_at);
        }
        warn!(
            "ip {} quarantined for {}ms",
            ip,
            self.recovery_window.as_millis()
        );

        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let quarantine = Arc::clone(&self.quarantine);
        let recovery_window = self.recovery_window;
        runtime.spawn(async move {
            sleep(recovery_window).await;
            let mut failures = quarantine.write().unwrap_or_else(PoisonError::into_inner);
            let expired = failures
                .get(&ip)
                .is_some_and(|latest| latest.elapsed() >= recovery_window);
            if expired {
                failures.remove(&ip);
                debug!("ip {} back in rotation", ip);
            }
        });
    }

    fn quarantined(&self) -> Vec<IpAddr> {
        let failures = self.quarantine.read().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        self.candidates
            .iter()
            .filter(|ip| self.is_quarantined(&failures, ip, now))
            .collect()
    }
}
