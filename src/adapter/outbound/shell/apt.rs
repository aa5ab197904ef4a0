//! Package installation via apt-get.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::PackageManager;

use super::run_checked;

/// Debian/Ubuntu package manager adapter.
///
/// Runs non-interactively; apt treats installing an already-present package
/// as a no-op success, which gives the pipeline its idempotency for free.
#[derive(Debug, Default, Clone, Copy)]
pub struct AptPackages;

#[async_trait]
impl PackageManager for AptPackages {
    async fn install(&self, package: &str) -> Result<()> {
        info!(package, "Installing package");
        run_checked(
            "apt-get",
            &["install", "-y", "--no-install-recommends", package],
        )
        .await
    }
}
