use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' has no host.")]
    UrlMissingHost { url: String },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
}

/// Failure of a single request. Never escapes the dispatch loop.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Timeout { .. } => true,
            TransportError::Request { source } => source.is_timeout(),
            TransportError::Client { .. } => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        TransportError::Request { source }
    }
}
