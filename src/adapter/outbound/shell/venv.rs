//! Python virtual environments via python3/pip.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::PythonEnv;

use super::{run_checked, run_ok};

/// venv/pip adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct VenvPython;

fn bin(venv: &Path, tool: &str) -> String {
    venv.join("bin").join(tool).display().to_string()
}

#[async_trait]
impl PythonEnv for VenvPython {
    async fn create(&self, venv: &Path) -> Result<()> {
        info!(venv = %venv.display(), "Creating virtual environment");
        run_checked("python3", &["-m", "venv", &venv.display().to_string()]).await
    }

    async fn install_requirements(&self, venv: &Path, requirements: &Path) -> Result<()> {
        info!(requirements = %requirements.display(), "Installing Python dependencies");
        run_checked(
            &bin(venv, "pip"),
            &["install", "-r", &requirements.display().to_string()],
        )
        .await
    }

    async fn has_module(&self, venv: &Path, module: &str) -> bool {
        run_ok(
            &bin(venv, "python"),
            &["-c", &format!("import {module}")],
        )
        .await
    }

    async fn install_package(&self, venv: &Path, package: &str) -> Result<()> {
        info!(package, "Installing Python package explicitly");
        run_checked(&bin(venv, "pip"), &["install", package]).await
    }
}
