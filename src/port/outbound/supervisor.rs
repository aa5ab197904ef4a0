//! Process supervisor port.
//!
//! The supervisor keeps the deployed applications running, restarts them on
//! crash and can persist its process list so it is restored after a reboot.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// Description of an application handed to the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSpec {
    /// Name the supervisor tracks the process under.
    pub name: String,
    /// Working directory the process starts in.
    pub cwd: PathBuf,
    /// Program or script to run.
    pub script: String,
    /// Arguments passed to the script.
    pub args: Vec<String>,
    /// Interpreter override (the backend runs under its venv interpreter).
    pub interpreter: Option<PathBuf>,
    /// Extra environment for the process.
    pub env: Vec<(String, String)>,
}

/// Supervises long-running application processes.
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Install the supervisor itself if it is not already present.
    async fn ensure_installed(&self) -> Result<()>;

    /// Register the supervisor as a boot service.
    ///
    /// Callers treat failure as tolerated: the registration command is known
    /// to exit non-zero with cosmetic warnings on some hosts.
    async fn register_boot(&self) -> Result<()>;

    /// Remove a named process if it exists. Missing processes are not an
    /// error, so this never fails.
    async fn delete(&self, name: &str);

    /// Start an application under supervision.
    async fn start(&self, spec: &AppSpec) -> Result<()>;

    /// Persist the current process list for reboot survival.
    async fn save(&self) -> Result<()>;

    /// Human-readable process list for diagnostics.
    async fn list(&self) -> Result<String>;
}
