use std::num::NonZeroUsize;
use std::time::Duration;

use super::types::PositiveUsize;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("lbcheck/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_CONCURRENCY: PositiveUsize = match NonZeroUsize::new(4) {
    Some(value) => PositiveUsize::from_non_zero(value),
    None => PositiveUsize::from_non_zero(NonZeroUsize::MIN),
};
pub(crate) const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
pub(crate) const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(1);
pub(crate) const DEFAULT_REDIRECT_LIMIT: u32 = 10;
pub(crate) const DEFAULT_DNS_PORT: u16 = 53;
