//! Object storage port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Fetches named objects (TLS artifacts) from a storage bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copy a remote object to a local path.
    async fn fetch(&self, remote: &str, dest: &Path) -> Result<()>;
}
