//! NFS mounting and fstab persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::port::outbound::MountTable;

use super::{run_checked, run_ok};

/// Mount adapter backed by `mount`/`mountpoint` and an fstab file.
pub struct FstabMounts {
    /// Mount table file, `/etc/fstab` on a real host.
    fstab: PathBuf,
}

impl FstabMounts {
    #[must_use]
    pub fn new(fstab: PathBuf) -> Self {
        Self { fstab }
    }
}

impl Default for FstabMounts {
    fn default() -> Self {
        Self::new(PathBuf::from("/etc/fstab"))
    }
}

#[async_trait]
impl MountTable for FstabMounts {
    async fn is_mounted(&self, mount_point: &Path) -> bool {
        run_ok("mountpoint", &["-q", &mount_point.display().to_string()]).await
    }

    async fn mount_nfs(&self, export: &str, mount_point: &Path, options: &str) -> Result<()> {
        tokio::fs::create_dir_all(mount_point).await?;
        info!(export, mount_point = %mount_point.display(), "Mounting NFS share");
        run_checked(
            "mount",
            &[
                "-t",
                "nfs4",
                "-o",
                options,
                export,
                &mount_point.display().to_string(),
            ],
        )
        .await
    }

    async fn persist(&self, entry: &str) -> Result<()> {
        let current = match tokio::fs::read_to_string(&self.fstab).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        if current.lines().any(|line| line.trim() == entry.trim()) {
            debug!("fstab entry already present");
            return Ok(());
        }

        let mut updated = current;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(entry.trim());
        updated.push('\n');
        tokio::fs::write(&self.fstab, updated).await?;
        info!("Persisted fstab entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "fs.example.internal:/ /mnt/shared nfs4 nfsvers=4.1,hard 0 0";

    #[tokio::test]
    async fn test_persist_appends_entry_once() {
        let dir = tempfile::tempdir().unwrap();
        let fstab = dir.path().join("fstab");
        std::fs::write(&fstab, "# existing\n").unwrap();
        let mounts = FstabMounts::new(fstab.clone());

        mounts.persist(ENTRY).await.unwrap();
        mounts.persist(ENTRY).await.unwrap();

        let contents = std::fs::read_to_string(&fstab).unwrap();
        assert_eq!(
            contents.lines().filter(|line| line.contains("/mnt/shared")).count(),
            1
        );
        assert!(contents.starts_with("# existing\n"));
    }

    #[tokio::test]
    async fn test_persist_creates_missing_fstab() {
        let dir = tempfile::tempdir().unwrap();
        let fstab = dir.path().join("fstab");
        let mounts = FstabMounts::new(fstab.clone());

        mounts.persist(ENTRY).await.unwrap();

        let contents = std::fs::read_to_string(&fstab).unwrap();
        assert_eq!(contents, format!("{ENTRY}\n"));
    }

    #[tokio::test]
    async fn test_persist_adds_newline_before_append() {
        let dir = tempfile::tempdir().unwrap();
        let fstab = dir.path().join("fstab");
        std::fs::write(&fstab, "# no trailing newline").unwrap();
        let mounts = FstabMounts::new(fstab.clone());

        mounts.persist(ENTRY).await.unwrap();

        let contents = std::fs::read_to_string(&fstab).unwrap();
        assert!(contents.contains("# no trailing newline\n"));
        assert!(contents.ends_with(&format!("{ENTRY}\n")));
    }
}
