//! Node toolchain port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Installs and queries the Node runtime via its version manager.
#[async_trait]
pub trait Toolchain: Send + Sync {
    /// Version string of the installed runtime, or `None` if the runtime
    /// executable is not resolvable.
    ///
    /// The installer short-circuits on `Some` without comparing versions;
    /// the detected version is only logged.
    async fn runtime_version(&self) -> Option<String>;

    /// Install the version manager itself from its pinned install script.
    async fn install_manager(&self, version: &str) -> Result<()>;

    /// Install a specific runtime version.
    async fn install_runtime(&self, version: &str) -> Result<()>;

    /// Make a runtime version the default for future shells.
    async fn set_default(&self, version: &str) -> Result<()>;

    /// Install JavaScript dependencies in a checkout.
    async fn npm_install(&self, dir: &Path) -> Result<()>;
}
