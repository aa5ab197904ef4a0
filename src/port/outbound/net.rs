//! Network boundary ports: cloud metadata and local port probes.

use async_trait::async_trait;

use crate::error::Result;

/// The cloud instance metadata endpoint.
///
/// Reachability doubles as the "are we running in the target cloud" signal:
/// when the endpoint is unreachable the address verification is skipped
/// entirely, which keeps local test runs from stalling for ten minutes.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Whether the metadata endpoint answers at all.
    async fn available(&self) -> bool;

    /// The public IPv4 address currently attached to the instance.
    async fn public_ipv4(&self) -> Result<String>;
}

/// Probes local TCP ports over HTTP.
#[async_trait]
pub trait PortProber: Send + Sync {
    /// Whether anything answers an HTTP request on the loopback port.
    /// Any response counts, regardless of status code.
    async fn reachable(&self, port: u16) -> bool;
}
