//! Source repository port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Fetches and updates git checkouts for the deployed applications.
#[async_trait]
pub trait RepoSync: Send + Sync {
    /// Clone a repository into `dest`.
    async fn clone(&self, url: &str, dest: &Path) -> Result<()>;

    /// Update an existing checkout at `dest`.
    ///
    /// Callers treat failure as tolerated: a stale checkout is preferred
    /// over aborting the run.
    async fn pull(&self, dest: &Path) -> Result<()>;
}
