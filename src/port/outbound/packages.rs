//! System package manager port.

use async_trait::async_trait;

use crate::error::Result;

/// Installs distribution packages (nginx, nfs utilities).
///
/// Installation must be idempotent: installing an already-present package
/// succeeds without side effects, which is how apt behaves.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Install a package by name.
    async fn install(&self, package: &str) -> Result<()>;
}
