//! Model-runtime port.

use async_trait::async_trait;

use crate::error::Result;

/// Installs the local model-serving daemon and pulls model weights.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Run the pinned install script for the daemon.
    async fn install(&self) -> Result<()>;

    /// Pull a model's weights. Blocks until the download completes; there
    /// is no timeout and no progress reporting beyond the tool's own output.
    async fn pull(&self, model: &str) -> Result<()>;
}
