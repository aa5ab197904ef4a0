//! Model-runtime install, readiness wait, weight pull.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::{Result, StepError};

use super::ProvisionStep;

/// 15 probes 5 seconds apart: a 75-second bound.
const READY_ATTEMPTS: u32 = 15;
const READY_DELAY: Duration = Duration::from_secs(5);
/// One forced restart after this many failed probes.
const RESTART_AFTER: u32 = 7;

/// systemd drop-in keeping the daemon alive.
const SERVICE_OVERRIDE: &str = "[Service]\nRestart=always\nRestartSec=3\n";

/// Installs the model-serving daemon, waits for it, pulls the model.
pub struct ModelRuntimeInstaller;

/// Probe until the daemon answers, forcing one restart at the midpoint.
///
/// Never exceeds [`READY_ATTEMPTS`] probes; exhaustion is fatal because
/// everything after this step needs a serving daemon.
async fn wait_ready(ctx: &StepContext) -> Result<()> {
    let model = &ctx.config.model;
    let mut restarted = false;

    for attempt in 1..=READY_ATTEMPTS {
        if ctx.prober.reachable(model.port).await {
            info!(attempt, port = model.port, "Model runtime ready");
            return Ok(());
        }

        if attempt == RESTART_AFTER && !restarted {
            warn!(attempt, "Model runtime not ready, forcing one restart");
            if let Err(err) = ctx.services.restart(&model.service).await {
                warn!(error = %err, "Forced restart failed");
            }
            restarted = true;
        }

        if attempt < READY_ATTEMPTS {
            tokio::time::sleep(READY_DELAY).await;
        }
    }

    Err(StepError::NotReady {
        service: model.service.clone(),
        attempts: READY_ATTEMPTS,
    }
    .into())
}

#[async_trait]
impl ProvisionStep for ModelRuntimeInstaller {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let model = &ctx.config.model;

        ctx.model.install().await?;
        ctx.services
            .write_override(&model.service, SERVICE_OVERRIDE)
            .await?;
        ctx.services.daemon_reload().await?;
        ctx.services.enable(&model.service).await?;
        ctx.services.start(&model.service).await?;

        wait_ready(ctx).await?;

        // Blocks until the weights are local; no timeout by design.
        ctx.model.pull(&model.name).await?;
        Ok(StepOutcome::Success)
    }
}
