use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::Resolver as HickoryResolver;
use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolveHosts, ResolverConfig, ResolverOpts,
};
use hickory_resolver::name_server::TokioConnectionProvider;
use tokio::net::lookup_host;

use crate::error::LookupError;
use crate::util::dedup_ordered;

use super::NameServerAddr;

/// One source of host answers raced by [`super::Resolver`].
#[async_trait]
pub trait HostLookup: Send + Sync {
    fn label(&self) -> String;

    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Queries exactly one DNS server, bypassing the system configuration.
pub struct NameServerLookup {
    server: NameServerAddr,
    query_timeout: Duration,
}

impl NameServerLookup {
    #[must_use]
    pub const fn new(server: NameServerAddr, query_timeout: Duration) -> Self {
        Self {
            server,
            query_timeout,
        }
    }

    async fn server_ips(&self) -> Result<Vec<IpAddr>, LookupError> {
        if let Ok(ip) = self.server.host().parse::<IpAddr>() {
            return Ok(vec![ip]);
        }
        let ips: Vec<IpAddr> = lookup_host((self.server.host(), self.server.port()))
            .await?
            .map(|addr| addr.ip())
            .collect();
        let ips = dedup_ordered(ips);
        if ips.is_empty() {
            return Err(LookupError::ServerUnresolved {
                server: self.server.to_string(),
            });
        }
        Ok(ips)
    }
}

#[async_trait]
impl HostLookup for NameServerLookup {
    fn label(&self) -> String {
        self.server.to_string()
    }

    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let server_ips = self.server_ips().await?;
        let group = NameServerConfigGroup::from_ips_clear(&server_ips, self.server.port(), true);
        let config = ResolverConfig::from_parts(None, vec![], group);

        let resolver =
            HickoryResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(server_options(self.query_timeout))
                .build();
        let response = resolver.lookup_ip(host).await?;
        Ok(response.iter().collect())
    }
}

/// Options for a resolver that must only ever ask its one configured server.
pub(super) fn server_options(query_timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts.timeout = query_timeout;
    opts.attempts = 1;
    opts.use_hosts_file = ResolveHosts::Never;
    opts
}

/// The platform resolver (getaddrinfo through tokio).
pub struct SystemLookup;

#[async_trait]
impl HostLookup for SystemLookup {
    fn label(&self) -> String {
        "system".to_owned()
    }

    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let ips: Vec<IpAddr> = lookup_host((host, 0u16))
            .await?
            .map(|addr| addr.ip())
            .collect();
        if ips.is_empty() {
            return Err(LookupError::Empty);
        }
        Ok(ips)
    }
}
