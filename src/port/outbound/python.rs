//! Python environment port.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Builds and populates the backend's isolated Python environment.
#[async_trait]
pub trait PythonEnv: Send + Sync {
    /// Create a fresh virtual environment at `venv`.
    async fn create(&self, venv: &Path) -> Result<()>;

    /// Install declared dependencies from a requirements file.
    async fn install_requirements(&self, venv: &Path, requirements: &Path) -> Result<()>;

    /// Whether a module is importable inside the environment.
    async fn has_module(&self, venv: &Path, module: &str) -> bool;

    /// Install a single package explicitly.
    async fn install_package(&self, venv: &Path, package: &str) -> Result<()>;
}
