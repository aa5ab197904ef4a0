//! Model runtime install and weight pulls via the ollama tooling.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::ModelRuntime;

use super::{run_checked, run_login_shell};

/// ollama adapter.
pub struct OllamaRuntime {
    install_url: String,
}

impl OllamaRuntime {
    #[must_use]
    pub fn new(install_url: String) -> Self {
        Self { install_url }
    }
}

#[async_trait]
impl ModelRuntime for OllamaRuntime {
    async fn install(&self) -> Result<()> {
        info!(url = %self.install_url, "Running model-runtime install script");
        run_login_shell(&format!("curl -fsSL {} | sh", self.install_url)).await
    }

    async fn pull(&self, model: &str) -> Result<()> {
        // Blocks until the weights are downloaded; ollama prints its own
        // progress and there is no timeout to apply here.
        info!(model, "Pulling model weights");
        run_checked("ollama", &["pull", model]).await
    }
}
