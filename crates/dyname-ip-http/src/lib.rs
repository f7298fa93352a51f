// # HTTP IP Source
//
// This crate discovers the caller's public addresses by asking plain-text
// "what is my address" services, one per address family.
//
// ## Behavior
//
// - One GET per family per run; nothing is cached
// - The response body is the address, surrounding whitespace ignored
// - IPv4 answers go through the same normalization as stored record answers,
//   so `203.000.113.009` is accepted as `203.0.113.9`
// - Any transport failure, error status, or unparsable body fails the lookup
//
// ## Defaults
//
// - IPv4: https://v4.ident.me
// - IPv6: https://v6.ident.me

use async_trait::async_trait;
use dyname_core::address::{normalize_ipv4, normalize_ipv6};
use dyname_core::config::IpLookupConfig;
use dyname_core::traits::IpSource;
use dyname_core::{Error, Result};

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

/// Lookup request timeout
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// Service answering with the IPv4 address
    v4_url: String,

    /// Service answering with the IPv6 address
    v6_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `v4_url`: URL returning the IPv4 address as plain text
    /// - `v6_url`: URL returning the IPv6 address as plain text
    pub fn new(v4_url: impl Into<String>, v6_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            v4_url: v4_url.into(),
            v6_url: v6_url.into(),
            client,
        })
    }

    /// Create from the `ipLookup` configuration section
    pub fn from_config(config: &IpLookupConfig) -> Result<Self> {
        Self::new(&config.v4_url, &config.v6_url)
    }

    /// Fetch the trimmed response body of `url`
    async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(Error::from_status(status, format!("GET {}", url)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("GET {}: failed to read response: {}", url, e)))?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current_v4(&self) -> Result<Ipv4Addr> {
        let text = self.fetch_text(&self.v4_url).await?;
        parse_v4(&text)
    }

    async fn current_v6(&self) -> Result<Ipv6Addr> {
        let text = self.fetch_text(&self.v6_url).await?;
        parse_v6(&text)
    }
}

fn parse_v4(text: &str) -> Result<Ipv4Addr> {
    normalize_ipv4(text.trim())
        .ok_or_else(|| Error::ip_source(format!("Invalid IPv4 address: {:?}", text)))
}

fn parse_v6(text: &str) -> Result<Ipv6Addr> {
    normalize_ipv6(text.trim())
        .ok_or_else(|| Error::ip_source(format!("Invalid IPv6 address: {:?}", text)))
}
