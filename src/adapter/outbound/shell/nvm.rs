//! Node toolchain via the Node version manager.
//!
//! nvm is a shell function sourced from the profile, so every operation here
//! runs under `bash -lc`.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::Toolchain;

use super::{capture_login_shell, run_login_shell};

/// nvm-backed toolchain adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NvmToolchain;

#[async_trait]
impl Toolchain for NvmToolchain {
    async fn runtime_version(&self) -> Option<String> {
        capture_login_shell("command -v node >/dev/null 2>&1 && node --version")
            .await
            .ok()
            .filter(|version| !version.is_empty())
    }

    async fn install_manager(&self, version: &str) -> Result<()> {
        info!(version, "Installing Node version manager");
        run_login_shell(&format!(
            "curl -fsSL https://raw.githubusercontent.com/nvm-sh/nvm/v{version}/install.sh | bash"
        ))
        .await
    }

    async fn install_runtime(&self, version: &str) -> Result<()> {
        info!(version, "Installing Node runtime");
        run_login_shell(&format!(
            "export NVM_DIR=\"$HOME/.nvm\" && . \"$NVM_DIR/nvm.sh\" && nvm install {version}"
        ))
        .await
    }

    async fn set_default(&self, version: &str) -> Result<()> {
        run_login_shell(&format!(
            "export NVM_DIR=\"$HOME/.nvm\" && . \"$NVM_DIR/nvm.sh\" && nvm alias default {version}"
        ))
        .await
    }

    async fn npm_install(&self, dir: &Path) -> Result<()> {
        info!(dir = %dir.display(), "Installing JavaScript dependencies");
        run_login_shell(&format!("cd {} && npm install", dir.display())).await
    }
}
