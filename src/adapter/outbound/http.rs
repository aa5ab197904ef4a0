//! HTTP-backed adapters: cloud metadata and local port probes.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, StepError};
use crate::port::outbound::{MetadataSource, PortProber};

/// Instance metadata adapter.
///
/// The endpoint returns the public address as plain text. Short timeouts
/// keep the availability check from hanging outside the target cloud.
pub struct ImdsMetadata {
    client: reqwest::Client,
    url: String,
}

impl ImdsMetadata {
    #[must_use]
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap_or_default();
        Self { client, url }
    }
}

#[async_trait]
impl MetadataSource for ImdsMetadata {
    async fn available(&self) -> bool {
        self.client.get(&self.url).send().await.is_ok()
    }

    async fn public_ipv4(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;
        let body = response.text().await?;
        let address = body.trim().to_string();
        if address.is_empty() {
            return Err(StepError::Metadata("empty response body".to_string()).into());
        }
        Ok(address)
    }
}

/// Loopback HTTP probe adapter.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortProber for HttpProber {
    async fn reachable(&self, port: u16) -> bool {
        // Any HTTP response counts; a 404 still means something is listening.
        self.client
            .get(format!("http://127.0.0.1:{port}/"))
            .send()
            .await
            .is_ok()
    }
}
