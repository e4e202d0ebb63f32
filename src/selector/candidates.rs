use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use crate::util::dedup_ordered;

/// Ordered, de-duplicated, non-empty list of IPs resolved for the target.
///
/// Cloning is cheap; the list itself is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    ips: Arc<[IpAddr]>,
}

impl CandidateSet {
    /// Returns `None` when `ips` is empty.
    #[must_use]
    pub fn new(ips: Vec<IpAddr>) -> Option<Self> {
        let ips = dedup_ordered(ips);
        if ips.is_empty() {
            return None;
        }
        Some(Self { ips: ips.into() })
    }

    #[must_use]
    pub fn first(&self) -> IpAddr {
        // `new` rejects empty lists, so the fallback is unreachable.
        self.ips
            .first()
            .copied()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    #[must_use]
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.ips.contains(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.ips.iter().copied()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<IpAddr> {
        self.ips.to_vec()
    }
}
