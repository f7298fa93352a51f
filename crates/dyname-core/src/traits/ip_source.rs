// # IP Source Trait
//
// Defines the interface for discovering the caller's current public addresses.
//
// ## Implementations
//
// - HTTP "what is my address" services: `dyname-ip-http` crate

use async_trait::async_trait;
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::Result;

/// The current public address for each family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrentAddresses {
    pub v4: Ipv4Addr,
    pub v6: Ipv6Addr,
}

impl CurrentAddresses {
    pub fn new(v4: Ipv4Addr, v6: Ipv6Addr) -> Self {
        Self { v4, v6 }
    }

    /// Resolve both addresses from `source`, IPv4 first
    ///
    /// Fails if either lookup fails; reconciliation cannot proceed without both.
    pub async fn resolve(source: &dyn IpSource) -> Result<Self> {
        let v4 = source.current_v4().await?;
        tracing::info!("IPv4: {}", v4);
        let v6 = source.current_v6().await?;
        tracing::info!("IPv6: {}", v6);
        Ok(Self { v4, v6 })
    }
}

impl Display for CurrentAddresses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IPv4 {}, IPv6 {}", self.v4, self.v6)
    }
}

/// Trait for IP source implementations
///
/// Each call performs one fresh lookup; nothing is cached between runs.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Current public IPv4 address
    async fn current_v4(&self) -> Result<Ipv4Addr>;

    /// Current public IPv6 address
    async fn current_v6(&self) -> Result<Ipv6Addr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_canonical_forms() {
        let addresses = CurrentAddresses::new(
            Ipv4Addr::new(203, 0, 113, 9),
            "2001:0db8:0000::0009".parse().unwrap(),
        );

        assert_eq!(addresses.to_string(), "IPv4 203.0.113.9, IPv6 2001:db8::9");
    }
}
