use std::fmt;
use std::net::IpAddr;

use url::{Host, Url};

use crate::error::HttpError;

/// The target endpoint: scheme, host, port and path of a parsed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    host: String,
    port: u16,
}

impl Target {
    /// Parses `raw`, assuming `http://` when no scheme is given.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed URLs, non-HTTP schemes, or URLs
    /// without a host.
    pub fn parse(raw: &str) -> Result<Self, HttpError> {
        let trimmed = raw.trim();
        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_owned()
        } else {
            format!("http://{}", trimmed)
        };
        let url = Url::parse(&with_scheme).map_err(|source| HttpError::InvalidUrl {
            url: raw.to_owned(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HttpError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            Some(Host::Domain(_)) | None => {
                return Err(HttpError::UrlMissingHost {
                    url: raw.to_owned(),
                });
            }
        };
        let port = url
            .port_or_known_default()
            .ok_or_else(|| HttpError::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            })?;

        Ok(Self { url, host, port })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host name (or unbracketed IP literal) used for resolution and `Host`.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    #[must_use]
    pub fn ip_literal(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
