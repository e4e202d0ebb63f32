//! IP selection over a resolved candidate set.
mod candidates;
mod round_robin;


use std::net::IpAddr;

pub use candidates::CandidateSet;
pub use round_robin::{DEFAULT_RECOVERY_WINDOW, RoundRobinSelector};

/// Chooses the IP for each outgoing request and absorbs failure reports.
pub trait Selector: Send + Sync {
    /// Returns the IP for the next request. Never fails for a non-empty set.
    fn select_ip(&self) -> IpAddr;

    /// Takes `ip` out of rotation for the recovery window.
    fn set_fail(&self, ip: IpAddr);

    /// IPs currently out of rotation.
    fn quarantined(&self) -> Vec<IpAddr>;
}
