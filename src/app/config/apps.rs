//! Per-application configuration sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Frontend deployment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    /// Repository the frontend is cloned from.
    pub repo_url: String,
    /// Checkout directory.
    pub dir: PathBuf,
    /// Process name under the supervisor.
    pub app_name: String,
    /// Port the frontend binds to.
    pub port: u16,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/usealtoal/chat-frontend.git".into(),
            dir: PathBuf::from("/opt/chat-frontend"),
            app_name: "frontend".into(),
            port: 8081,
        }
    }
}

/// Backend deployment configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Repository the backend is cloned from.
    pub repo_url: String,
    /// Checkout directory.
    pub dir: PathBuf,
    /// Process name under the supervisor.
    pub app_name: String,
    /// Port the backend binds to.
    pub port: u16,
    /// Entry script started under the venv interpreter.
    pub entry: String,
    /// NFS export holding the shared retrieval data.
    pub nfs_export: String,
    /// Local mount point for the share.
    pub mount_point: PathBuf,
}

impl BackendConfig {
    /// The isolated environment directory, rebuilt on every run.
    #[must_use]
    pub fn venv(&self) -> PathBuf {
        self.dir.join("venv")
    }

    /// The declared-dependency file inside the checkout.
    #[must_use]
    pub fn requirements(&self) -> PathBuf {
        self.dir.join("requirements.txt")
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/usealtoal/rag-backend.git".into(),
            dir: PathBuf::from("/opt/rag-backend"),
            app_name: "backend".into(),
            port: 8000,
            entry: "main.py".into(),
            nfs_export: "fs.internal:/".into(),
            mount_point: PathBuf::from("/mnt/shared"),
        }
    }
}

/// Model-runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model whose weights are pulled after the daemon is ready.
    pub name: String,
    /// Port the daemon serves inference on.
    pub port: u16,
    /// Pinned install script URL.
    pub install_url: String,
    /// Service unit name.
    pub service: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "llama3".into(),
            port: 11434,
            install_url: "https://ollama.com/install.sh".into(),
            service: "ollama".into(),
        }
    }
}

/// Diagnostic-script configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    /// Where the standalone diagnostic script is written.
    pub script_path: PathBuf,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("/usr/local/bin/health_check.sh"),
        }
    }
}
