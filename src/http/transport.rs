use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use http::HeaderMap;
use reqwest::{Client, redirect};
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::TransportError;

use super::Target;

/// What a worker learned from one completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub url: Url,
    pub ip: IpAddr,
    pub status: u16,
    pub headers: HeaderMap,
    pub body_bytes: u64,
}

/// Issues a single GET for `target` over a connection dialed to `ip`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        target: &Target,
        ip: IpAddr,
        timeout: Duration,
    ) -> Result<FetchedResponse, TransportError>;
}

/// reqwest-backed transport.
///
/// One client per candidate IP, each with a resolve override that maps the
/// target host to that IP and idle pooling disabled, so the `Host` header and
/// TLS name stay those of the target while every request dials the chosen IP
/// on a fresh connection.
pub struct ReqwestTransport {
    redirect_limit: u32,
    clients: RwLock<HashMap<(IpAddr, Duration), Client>>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(redirect_limit: u32) -> Self {
        Self {
            redirect_limit,
            clients: RwLock::new(HashMap::new()),
        }
    }

    fn client_for(
        &self,
        target: &Target,
        ip: IpAddr,
        timeout: Duration,
    ) -> Result<Client, TransportError> {
        let key = (ip, timeout);
        {
            let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(client) = clients.get(&key) {
                return Ok(client.clone());
            }
        }

        let redirect_policy = if self.redirect_limit == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(usize::try_from(self.redirect_limit).unwrap_or(10))
        };
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(redirect_policy)
            .pool_max_idle_per_host(0)
            .resolve(target.host(), SocketAddr::new(ip, target.port()))
            .build()
            .map_err(|source| TransportError::Client { source })?;

        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        Ok(clients.entry(key).or_insert(client).clone())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        target: &Target,
        ip: IpAddr,
        timeout: Duration,
    ) -> Result<FetchedResponse, TransportError> {
        let client = self.client_for(target, ip, timeout)?;
        let response = client.get(target.url().clone()).send().await?;
        let url = response.url().clone();
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body_bytes = drain_response_body(response).await?;
        Ok(FetchedResponse {
            url,
            ip,
            status,
            headers,
            body_bytes,
        })
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
