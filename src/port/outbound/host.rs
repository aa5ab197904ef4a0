//! Generic host command port.
//!
//! Escape hatch for one-off commands that do not justify a dedicated port,
//! such as the proxy configuration syntax check.

use async_trait::async_trait;

use crate::error::Result;

/// Runs arbitrary host commands.
#[async_trait]
pub trait HostRunner: Send + Sync {
    /// Run a command and fail on non-zero exit.
    async fn run(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Run a command and capture its stdout, failing on non-zero exit.
    async fn capture(&self, program: &str, args: &[&str]) -> Result<String>;
}
