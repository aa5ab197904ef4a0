//! Runtime and process-supervisor install.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;

use super::ProvisionStep;

/// Installs the Node runtime (via its version manager) and the process
/// supervisor, then registers the supervisor as a boot service.
pub struct RuntimeInstaller;

#[async_trait]
impl ProvisionStep for RuntimeInstaller {
    fn name(&self) -> &'static str {
        "runtime"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let runtime = &ctx.config.runtime;

        // Presence short-circuits the install without a version check; the
        // detected version is logged so drift shows up in the run log.
        match ctx.toolchain.runtime_version().await {
            Some(version) => {
                info!(version, "Runtime already installed, skipping install");
            }
            None => {
                ctx.toolchain.install_manager(&runtime.nvm_version).await?;
                ctx.toolchain.install_runtime(&runtime.node_version).await?;
                ctx.toolchain.set_default(&runtime.node_version).await?;
            }
        }

        ctx.supervisor.ensure_installed().await?;

        // Boot registration emits non-fatal warnings on some hosts and may
        // exit non-zero; swallowing it keeps re-runs from aborting here.
        let mut warnings = Vec::new();
        if let Err(err) = ctx.supervisor.register_boot().await {
            warn!(error = %err, "Supervisor boot registration failed");
            warnings.push(format!("supervisor boot registration failed: {err}"));
        }

        if warnings.is_empty() {
            Ok(StepOutcome::Success)
        } else {
            Ok(StepOutcome::Tolerated(warnings))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::FakeHostSet;

    #[tokio::test]
    async fn test_present_runtime_skips_install_actions() {
        let hosts = FakeHostSet::new();
        hosts.toolchain.set_installed_version("v20.11.1");
        let ctx = hosts.context();

        let outcome = RuntimeInstaller.execute(&ctx).await.unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(hosts.log.count_prefix("toolchain.install"), 0);
        assert_eq!(hosts.log.count_prefix("toolchain.set_default"), 0);
    }

    #[tokio::test]
    async fn test_missing_runtime_installs_and_defaults() {
        let hosts = FakeHostSet::new();
        let ctx = hosts.context();

        RuntimeInstaller.execute(&ctx).await.unwrap();

        assert!(hosts.log.contains("toolchain.install_manager 0.39.7"));
        assert!(hosts.log.contains("toolchain.install_runtime 20"));
        assert!(hosts.log.contains("toolchain.set_default 20"));
    }

    #[tokio::test]
    async fn test_supervisor_installed_either_way() {
        let hosts = FakeHostSet::new();
        hosts.toolchain.set_installed_version("v20.11.1");
        let ctx = hosts.context();

        RuntimeInstaller.execute(&ctx).await.unwrap();

        assert!(hosts.log.contains("supervisor.ensure_installed"));
    }

    #[tokio::test]
    async fn test_boot_registration_failure_is_tolerated() {
        let hosts = FakeHostSet::new();
        hosts.supervisor.fail_boot_registration();
        let ctx = hosts.context();

        let outcome = RuntimeInstaller.execute(&ctx).await.unwrap();

        match outcome {
            StepOutcome::Tolerated(warnings) => {
                assert_eq!(warnings.len(), 1);
                assert!(warnings[0].contains("boot registration"));
            }
            StepOutcome::Success => panic!("expected tolerated outcome"),
        }
    }
}
