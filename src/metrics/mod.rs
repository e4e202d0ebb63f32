//! Run statistics: success/failure counters per IP and latency percentiles.
mod histogram;
mod summary;

#[cfg(test)]
mod tests;

pub use histogram::LatencyHistogram;
pub use summary::{IpBreakdown, IpStats, RunStats, RunSummary};
