use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use crate::args::{
    DEFAULT_CONCURRENCY, DEFAULT_INTERVAL, DEFAULT_REDIRECT_LIMIT, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RESOLVE_TIMEOUT, PositiveU64, PositiveUsize,
};
use crate::dns::NameServerAddr;
use crate::http::{FetchedResponse, Target};
use crate::selector::DEFAULT_RECOVERY_WINDOW;

use super::RunEvent;

/// Invoked from the aggregation loop for each counted successful response.
/// Responses that arrive after the success target is reached are not passed on.
pub type ResponseHandler = Arc<dyn Fn(&FetchedResponse) + Send + Sync>;

/// Logs the final URL and status code of each response.
#[must_use]
pub fn default_response_handler() -> ResponseHandler {
    Arc::new(|response: &FetchedResponse| {
        info!("response from {}: code {}", response.url, response.status);
    })
}

#[derive(Clone)]
pub struct DispatchConfig {
    pub target: Target,
    /// Number of successful responses that ends the run.
    pub requests: PositiveU64,
    pub concurrency: PositiveUsize,
    /// Minimum gap between two request starts.
    pub interval: Duration,
    pub request_timeout: Duration,
    pub resolve_timeout: Duration,
    pub recovery_window: Duration,
    /// Empty means system resolution.
    pub dns_servers: Vec<NameServerAddr>,
    pub redirect_limit: u32,
    pub response_handler: Option<ResponseHandler>,
    pub events: Option<mpsc::UnboundedSender<RunEvent>>,
}

impl DispatchConfig {
    #[must_use]
    pub fn new(target: Target, requests: PositiveU64) -> Self {
        Self {
            target,
            requests,
            concurrency: DEFAULT_CONCURRENCY,
            interval: DEFAULT_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            recovery_window: DEFAULT_RECOVERY_WINDOW,
            dns_servers: Vec::new(),
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            response_handler: Some(default_response_handler()),
            events: None,
        }
    }
}

impl fmt::Debug for DispatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchConfig")
            .field("target", &self.target)
            .field("requests", &self.requests)
            .field("concurrency", &self.concurrency)
            .field("interval", &self.interval)
            .field("request_timeout", &self.request_timeout)
            .field("resolve_timeout", &self.resolve_timeout)
            .field("recovery_window", &self.recovery_window)
            .field("dns_servers", &self.dns_servers)
            .field("redirect_limit", &self.redirect_limit)
            .field("response_handler", &self.response_handler.is_some())
            .field("events", &self.events.is_some())
            .finish()
    }
}
