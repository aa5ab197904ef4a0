//! System service manager port.

use async_trait::async_trait;

use crate::error::Result;

/// Controls system services (nginx, the model-runtime daemon).
#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Reload unit definitions after a unit or override file changed.
    async fn daemon_reload(&self) -> Result<()>;

    /// Enable a unit so it starts on boot.
    async fn enable(&self, unit: &str) -> Result<()>;

    /// Start a unit.
    async fn start(&self, unit: &str) -> Result<()>;

    /// Restart a unit.
    async fn restart(&self, unit: &str) -> Result<()>;

    /// Write a drop-in override for a unit. Requires a `daemon_reload`
    /// before it takes effect.
    async fn write_override(&self, unit: &str, contents: &str) -> Result<()>;

    /// One-line status summary for diagnostics, never fails.
    async fn status_line(&self, unit: &str) -> String;
}
