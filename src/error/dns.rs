use std::time::Duration;

use thiserror::Error;

/// Failure of one lookup backend (a single DNS server or the platform resolver).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("DNS query failed: {source}")]
    Dns {
        #[from]
        source: hickory_resolver::ResolveError,
    },
    #[error("lookup I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("DNS server '{server}' did not resolve to an address.")]
    ServerUnresolved { server: String },
    #[error("no addresses returned")]
    Empty,
    #[error("lookup timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("all {attempts} DNS servers failed to resolve {host}")]
    AllServersFailed { host: String, attempts: usize },
    #[error("no DNS server resolved {host} within {}ms", timeout.as_millis())]
    Timeout { host: String, timeout: Duration },
    #[error("failed to resolve {host}: {source}")]
    System {
        host: String,
        #[source]
        source: LookupError,
    },
    #[error("no addresses resolved for {host}")]
    NoAddresses { host: String },
}
