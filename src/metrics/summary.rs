use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use super::LatencyHistogram;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct IpStats {
    pub successes: u64,
    pub server_errors: u64,
    pub transport_errors: u64,
}

impl IpStats {
    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.successes
            .saturating_add(self.server_errors)
            .saturating_add(self.transport_errors)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IpBreakdown {
    pub ip: IpAddr,
    #[serde(flatten)]
    pub stats: IpStats,
}

/// Final report of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub candidates: Vec<IpAddr>,
    pub requested: u64,
    pub successes: u64,
    pub server_errors: u64,
    pub transport_errors: u64,
    pub attempts: u64,
    pub per_ip: Vec<IpBreakdown>,
    pub latency_p50_ms: u64,
    pub latency_p90_ms: u64,
    pub latency_p99_ms: u64,
    pub latency_max_ms: u64,
    pub elapsed_ms: u64,
    pub quarantined: Vec<IpAddr>,
}

/// Accumulates outcomes on the aggregation loop.
#[derive(Debug)]
pub struct RunStats {
    per_ip: BTreeMap<IpAddr, IpStats>,
    latency: Option<LatencyHistogram>,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    #[must_use]
    pub fn new() -> Self {
        let latency = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("latency percentiles disabled: {}", err);
                None
            }
        };
        Self {
            per_ip: BTreeMap::new(),
            latency,
        }
    }

    pub fn record_success(&mut self, ip: IpAddr, elapsed: Duration) {
        let stats = self.per_ip.entry(ip).or_default();
        stats.successes = stats.successes.saturating_add(1);
        self.record_latency(elapsed);
    }

    pub fn record_server_error(&mut self, ip: IpAddr, elapsed: Duration) {
        let stats = self.per_ip.entry(ip).or_default();
        stats.server_errors = stats.server_errors.saturating_add(1);
        self.record_latency(elapsed);
    }

    pub fn record_transport_error(&mut self, ip: IpAddr) {
        let stats = self.per_ip.entry(ip).or_default();
        stats.transport_errors = stats.transport_errors.saturating_add(1);
    }

    #[must_use]
    pub fn ip(&self, ip: &IpAddr) -> IpStats {
        self.per_ip.get(ip).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn totals(&self) -> IpStats {
        self.per_ip.values().fold(IpStats::default(), |acc, stats| IpStats {
            successes: acc.successes.saturating_add(stats.successes),
            server_errors: acc.server_errors.saturating_add(stats.server_errors),
            transport_errors: acc.transport_errors.saturating_add(stats.transport_errors),
        })
    }

    fn record_latency(&mut self, elapsed: Duration) {
        let Some(latency) = self.latency.as_mut() else {
            return;
        };
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if let Err(err) = latency.record(millis) {
            warn!("{}", err);
        }
    }

    #[must_use]
    pub fn finish(
        &self,
        target: String,
        candidates: Vec<IpAddr>,
        requested: u64,
        elapsed: Duration,
        quarantined: Vec<IpAddr>,
    ) -> RunSummary {
        let totals = self.totals();
        let (p50, p90, p99, max) = self.latency.as_ref().map_or((0, 0, 0, 0), |latency| {
            let (p50, p90, p99) = latency.percentiles();
            (p50, p90, p99, latency.max())
        });
        let per_ip = candidates
            .iter()
            .map(|ip| IpBreakdown {
                ip: *ip,
                stats: self.ip(ip),
            })
            .collect();

        RunSummary {
            target,
            candidates,
            requested,
            successes: totals.successes,
            server_errors: totals.server_errors,
            transport_errors: totals.transport_errors,
            attempts: totals.attempts(),
            per_ip,
            latency_p50_ms: p50,
            latency_p90_ms: p90,
            latency_p99_ms: p99,
            latency_max_ms: max,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            quarantined,
        }
    }
}
