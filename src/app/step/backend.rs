//! Backend deploy: shared-data mount, checkout, isolated environment,
//! supervised start.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;
use crate::port::outbound::AppSpec;

use super::frontend::sync_checkout;
use super::ProvisionStep;

/// Mount options for the shared-data export.
const NFS_OPTIONS: &str = "nfsvers=4.1,rsize=1048576,wsize=1048576,hard,timeo=600,retrans=2";

/// Dependencies verified explicitly after the requirements install, because
/// the declaration file has been observed to miss them.
const REQUIRED_MODULES: [&str; 2] = ["fastapi", "uvicorn"];

/// Deploys the retrieval backend under the process supervisor.
pub struct BackendDeployer;

async fn ensure_mounted(ctx: &StepContext, warnings: &mut Vec<String>) -> Result<()> {
    let backend = &ctx.config.backend;
    if ctx.mounts.is_mounted(&backend.mount_point).await {
        info!(mount_point = %backend.mount_point.display(), "Share already mounted");
    } else if let Err(err) = ctx
        .mounts
        .mount_nfs(&backend.nfs_export, &backend.mount_point, NFS_OPTIONS)
        .await
    {
        // Racing an existing mount is the common cause here.
        warn!(error = %err, "Mount failed, continuing");
        warnings.push(format!("NFS mount failed: {err}"));
    }

    let entry = format!(
        "{} {} nfs4 {} 0 0",
        backend.nfs_export,
        backend.mount_point.display(),
        NFS_OPTIONS
    );
    ctx.mounts.persist(&entry).await
}

/// Remove and recreate the venv, then install dependencies.
///
/// Rebuilding from scratch on every run trades speed for reproducibility:
/// no dependency drift between deployments.
async fn rebuild_environment(ctx: &StepContext) -> Result<()> {
    let backend = &ctx.config.backend;
    let venv = backend.venv();

    match tokio::fs::remove_dir_all(&venv).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    ctx.python.create(&venv).await?;
    ctx.python
        .install_requirements(&venv, &backend.requirements())
        .await?;

    for module in REQUIRED_MODULES {
        if !ctx.python.has_module(&venv, module).await {
            warn!(module, "Declared dependencies missed a required module");
            ctx.python.install_package(&venv, module).await?;
        }
    }
    Ok(())
}

#[async_trait]
impl ProvisionStep for BackendDeployer {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let backend = &ctx.config.backend;
        let mut warnings = Vec::new();

        ensure_mounted(ctx, &mut warnings).await?;
        sync_checkout(ctx, &backend.repo_url, &backend.dir, &mut warnings).await?;
        rebuild_environment(ctx).await?;

        ctx.supervisor.delete(&backend.app_name).await;
        ctx.supervisor
            .start(&AppSpec {
                name: backend.app_name.clone(),
                cwd: backend.dir.clone(),
                script: backend.entry.clone(),
                args: vec![],
                interpreter: Some(backend.venv().join("bin").join("python")),
                env: vec![("PORT".into(), backend.port.to_string())],
            })
            .await?;
        ctx.supervisor.save().await?;
        info!(app = %backend.app_name, port = backend.port, "Backend deployed");

        if warnings.is_empty() {
            Ok(StepOutcome::Success)
        } else {
            Ok(StepOutcome::Tolerated(warnings))
        }
    }
}
