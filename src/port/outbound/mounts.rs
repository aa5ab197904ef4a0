//! Mount table port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Manages the network filesystem mount and its persistence across reboots.
#[async_trait]
pub trait MountTable: Send + Sync {
    /// Whether a filesystem is currently mounted at the given path.
    async fn is_mounted(&self, mount_point: &Path) -> bool;

    /// Mount an NFS export at the given path with explicit options.
    async fn mount_nfs(&self, export: &str, mount_point: &Path, options: &str) -> Result<()>;

    /// Append a mount-table entry so the mount survives reboot.
    ///
    /// Must be idempotent: an entry already present is not appended again.
    async fn persist(&self, entry: &str) -> Result<()>;
}
