//! Host resolution by racing several DNS servers.
//!
//! Every configured server is queried concurrently and the first non-empty
//! answer wins. Slower racers are left to finish on their own; their answers
//! are discarded. Without configured servers the platform resolver is used.
mod backend;
mod server;


use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, timeout as with_timeout};
use tracing::{debug, info};

use crate::error::{LookupError, ResolveError};
use crate::util::dedup_ordered;

pub use backend::{HostLookup, NameServerLookup, SystemLookup};
pub use server::NameServerAddr;

/// Upper bound for a single server's answer, nested inside the overall deadline.
pub const DNS_DIAL_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Resolver {
    servers: Vec<Arc<dyn HostLookup>>,
    system: Arc<dyn HostLookup>,
    dial_timeout: Duration,
}

impl Resolver {
    /// Builds a resolver that races one hickory-backed lookup per server.
    #[must_use]
    pub fn new(servers: &[NameServerAddr]) -> Self {
        let backends = servers
            .iter()
            .map(|server| {
                Arc::new(NameServerLookup::new(server.clone(), DNS_DIAL_TIMEOUT))
                    as Arc<dyn HostLookup>
            })
            .collect();
        Self::from_backends(backends, Arc::new(SystemLookup))
    }

    #[must_use]
    pub fn from_backends(servers: Vec<Arc<dyn HostLookup>>, system: Arc<dyn HostLookup>) -> Self {
        Self {
            servers,
            system,
            dial_timeout: DNS_DIAL_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    #[must_use]
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Resolves `host` to an ordered, de-duplicated, non-empty list of IPs.
    ///
    /// IP literals are returned as-is without any query.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Timeout`] when no server answered within
    /// `timeout`, [`ResolveError::AllServersFailed`] when every server failed
    /// first, and [`ResolveError::System`] when the platform lookup fails.
    pub async fn lookup(
        &self,
        timeout: Duration,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        if self.servers.is_empty() {
            return self.lookup_system(timeout, host).await;
        }

        let (result_tx, mut result_rx) = mpsc::channel(self.servers.len());
        for backend in &self.servers {
            let backend = Arc::clone(backend);
            let result_tx = result_tx.clone();
            let host = host.to_owned();
            let dial_timeout = self.dial_timeout;
            tokio::spawn(async move {
                let result = match with_timeout(dial_timeout, backend.lookup(&host)).await {
                    Ok(result) => result,
                    Err(_elapsed) => Err(LookupError::Timeout {
                        after: dial_timeout,
                    }),
                };
                drop(result_tx.send((backend.label(), result)).await);
            });
        }
        drop(result_tx);

        let deadline = sleep(timeout);
        tokio::pin!(deadline);
        let mut failures = 0usize;
        loop {
            tokio::select! {
                received = result_rx.recv() => match received {
                    Some((server, Ok(ips))) => {
                        let ips = dedup_ordered(ips);
                        if ips.is_empty() {
                            failures = failures.saturating_add(1);
                            debug!("dns server {} returned no addresses for {}", server, host);
                            continue;
                        }
                        info!("dns server {} resolved {} to {:?}", server, host, ips);
                        return Ok(ips);
                    }
                    Some((server, Err(err))) => {
                        failures = failures.saturating_add(1);
                        debug!("dns server {} failed to resolve {}: {}", server, host, err);
                    }
                    None => {
                        return Err(ResolveError::AllServersFailed {
                            host: host.to_owned(),
                            attempts: failures,
                        });
                    }
                },
                () = &mut deadline => {
                    return Err(ResolveError::Timeout {
                        host: host.to_owned(),
                        timeout,
                    });
                }
            }
        }
    }

    async fn lookup_system(
        &self,
        timeout: Duration,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        let result = match with_timeout(timeout, self.system.lookup(host)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(LookupError::Timeout { after: timeout }),
        };
        let ips = result.map_err(|source| ResolveError::System {
            host: host.to_owned(),
            source,
        })?;
        let ips = dedup_ordered(ips);
        if ips.is_empty() {
            return Err(ResolveError::NoAddresses {
                host: host.to_owned(),
            });
        }
        Ok(ips)
    }
}
