//! Frontend deploy: checkout, dependencies, supervised start.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;
use crate::port::outbound::AppSpec;

use super::ProvisionStep;

/// Deploys the web frontend under the process supervisor.
pub struct FrontendDeployer;

/// Clone on first run, pull afterwards. A failed pull is tolerated: stale
/// code is preferred over aborting the whole run.
pub(super) async fn sync_checkout(
    ctx: &StepContext,
    url: &str,
    dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<()> {
    if dir.join(".git").exists() {
        if let Err(err) = ctx.repos.pull(dir).await {
            warn!(dir = %dir.display(), error = %err, "Pull failed, keeping existing checkout");
            warnings.push(format!(
                "update of {} failed, running with existing checkout: {err}",
                dir.display()
            ));
        }
    } else {
        crate::port::outbound::RepoSync::clone(ctx.repos.as_ref(), url, dir).await?;
    }
    Ok(())
}

#[async_trait]
impl ProvisionStep for FrontendDeployer {
    fn name(&self) -> &'static str {
        "frontend"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let frontend = &ctx.config.frontend;
        let mut warnings = Vec::new();

        sync_checkout(ctx, &frontend.repo_url, &frontend.dir, &mut warnings).await?;
        ctx.toolchain.npm_install(&frontend.dir).await?;

        // Delete-then-start keeps the restart path identical to first start.
        ctx.supervisor.delete(&frontend.app_name).await;
        ctx.supervisor
            .start(&AppSpec {
                name: frontend.app_name.clone(),
                cwd: frontend.dir.clone(),
                script: "npm".into(),
                args: vec!["start".into()],
                interpreter: None,
                env: vec![("PORT".into(), frontend.port.to_string())],
            })
            .await?;
        ctx.supervisor.save().await?;
        info!(app = %frontend.app_name, port = frontend.port, "Frontend deployed");

        if warnings.is_empty() {
            Ok(StepOutcome::Success)
        } else {
            Ok(StepOutcome::Tolerated(warnings))
        }
    }
}
