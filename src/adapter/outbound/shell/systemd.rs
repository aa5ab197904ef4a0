//! Service management via systemctl.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::port::outbound::ServiceManager;

use super::{run_capture, run_checked};

/// systemd adapter.
pub struct SystemdServices {
    /// Root for drop-in override directories, `/etc/systemd/system` on a
    /// real host. Configurable so tests can point it at a temp dir.
    override_root: PathBuf,
}

impl SystemdServices {
    #[must_use]
    pub fn new(override_root: PathBuf) -> Self {
        Self { override_root }
    }
}

impl Default for SystemdServices {
    fn default() -> Self {
        Self::new(PathBuf::from("/etc/systemd/system"))
    }
}

#[async_trait]
impl ServiceManager for SystemdServices {
    async fn daemon_reload(&self) -> Result<()> {
        run_checked("systemctl", &["daemon-reload"]).await
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        run_checked("systemctl", &["enable", unit]).await
    }

    async fn start(&self, unit: &str) -> Result<()> {
        run_checked("systemctl", &["start", unit]).await
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        run_checked("systemctl", &["restart", unit]).await
    }

    async fn write_override(&self, unit: &str, contents: &str) -> Result<()> {
        let dir = self.override_root.join(format!("{unit}.service.d"));
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join("override.conf");
        debug!(path = %path.display(), "Writing unit override");
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }

    async fn status_line(&self, unit: &str) -> String {
        match run_capture(
            "systemctl",
            &["is-active", unit],
        )
        .await
        {
            Ok(state) => format!("{unit}: {state}"),
            Err(_) => format!("{unit}: inactive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_override_creates_dropin_file() {
        let dir = tempfile::tempdir().unwrap();
        let services = SystemdServices::new(dir.path().to_path_buf());

        services
            .write_override("ollama", "[Service]\nRestart=always\n")
            .await
            .unwrap();

        let written = std::fs::read_to_string(
            dir.path().join("ollama.service.d").join("override.conf"),
        )
        .unwrap();
        assert!(written.contains("Restart=always"));
    }

    #[tokio::test]
    async fn test_write_override_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let services = SystemdServices::new(dir.path().to_path_buf());

        services.write_override("ollama", "first").await.unwrap();
        services.write_override("ollama", "second").await.unwrap();

        let written = std::fs::read_to_string(
            dir.path().join("ollama.service.d").join("override.conf"),
        )
        .unwrap();
        assert_eq!(written, "second");
    }
}
