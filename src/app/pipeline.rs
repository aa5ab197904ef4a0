//! The fail-fast provisioning pipeline.

use chrono::Utc;
use tracing::{error, info};

use crate::app::context::StepContext;
use crate::app::step::{
    AddressWaiter, BackendDeployer, EnvBootstrap, FrontendDeployer, HealthCheckEmitter,
    ModelRuntimeInstaller, ProvisionStep, ProxyConfigurator, RuntimeInstaller,
};
use crate::domain::outcome::{Abort, RunReport, StepReport};

/// Ordered sequence of provisioning steps.
///
/// Execution is forward-only with no rollback: the first fatal error stops
/// the run and leaves earlier stages applied. Tolerated warnings accumulate
/// into the final report.
pub struct Pipeline {
    steps: Vec<Box<dyn ProvisionStep>>,
}

impl Pipeline {
    /// The full provisioning sequence.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            steps: vec![
                Box::new(EnvBootstrap),
                Box::new(RuntimeInstaller),
                Box::new(AddressWaiter),
                Box::new(ProxyConfigurator),
                Box::new(FrontendDeployer),
                Box::new(BackendDeployer),
                Box::new(ModelRuntimeInstaller),
                Box::new(HealthCheckEmitter),
            ],
        }
    }

    /// A pipeline with an explicit step list, used by tests.
    #[must_use]
    pub fn with_steps(steps: Vec<Box<dyn ProvisionStep>>) -> Self {
        Self { steps }
    }

    /// Step names in execution order, for `--dry-run` and reporting.
    #[must_use]
    pub fn plan(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Execute the pipeline against a host.
    pub async fn run(&self, ctx: &StepContext) -> RunReport {
        let started_at = Utc::now();
        let mut reports = Vec::new();
        let mut aborted = None;

        for step in &self.steps {
            info!(step = step.name(), "Starting step");
            match step.execute(ctx).await {
                Ok(outcome) => {
                    for warning in outcome.warnings() {
                        info!(step = step.name(), warning, "Step completed with warning");
                    }
                    reports.push(StepReport {
                        step: step.name(),
                        outcome,
                    });
                }
                Err(err) => {
                    error!(step = step.name(), error = %err, "Step failed, aborting run");
                    aborted = Some(Abort {
                        step: step.name(),
                        error: err.to_string(),
                    });
                    break;
                }
            }
        }

        RunReport {
            started_at,
            finished_at: Utc::now(),
            steps: reports,
            aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::StepOutcome;
    use crate::error::{Result, StepError};
    use crate::testkit::FakeHostSet;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct ScriptedStep {
        name: &'static str,
        result: fn() -> Result<StepOutcome>,
        executions: Arc<AtomicU32>,
    }

    #[async_trait]
    impl ProvisionStep for ScriptedStep {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn execute(&self, _ctx: &StepContext) -> Result<StepOutcome> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn step(
        name: &'static str,
        result: fn() -> Result<StepOutcome>,
    ) -> (Box<dyn ProvisionStep>, Arc<AtomicU32>) {
        let executions = Arc::new(AtomicU32::new(0));
        (
            Box::new(ScriptedStep {
                name,
                result,
                executions: executions.clone(),
            }),
            executions,
        )
    }

    fn fatal() -> Result<StepOutcome> {
        Err(StepError::Precondition("boom".into()).into())
    }

    #[tokio::test]
    async fn test_standard_pipeline_order() {
        let pipeline = Pipeline::standard();
        assert_eq!(
            pipeline.plan(),
            vec![
                "bootstrap",
                "runtime",
                "address",
                "proxy",
                "frontend",
                "backend",
                "model",
                "health"
            ]
        );
    }

    #[tokio::test]
    async fn test_fatal_step_stops_later_steps() {
        let (first, first_runs) = step("first", || Ok(StepOutcome::Success));
        let (second, second_runs) = step("second", fatal);
        let (third, third_runs) = step("third", || Ok(StepOutcome::Success));
        let pipeline = Pipeline::with_steps(vec![first, second, third]);
        let ctx = FakeHostSet::new().context();

        let report = pipeline.run(&ctx).await;

        assert!(!report.succeeded());
        let abort = report.aborted.unwrap();
        assert_eq!(abort.step, "second");
        assert!(abort.error.contains("boom"));
        assert_eq!(first_runs.load(Ordering::SeqCst), 1);
        assert_eq!(second_runs.load(Ordering::SeqCst), 1);
        assert_eq!(third_runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tolerated_outcomes_do_not_stop_the_run() {
        let (first, _) = step("first", || {
            Ok(StepOutcome::tolerated("address mismatch"))
        });
        let (second, second_runs) = step("second", || Ok(StepOutcome::Success));
        let pipeline = Pipeline::with_steps(vec![first, second]);
        let ctx = FakeHostSet::new().context();

        let report = pipeline.run(&ctx).await;

        assert!(report.succeeded());
        assert_eq!(second_runs.load(Ordering::SeqCst), 1);
        assert_eq!(report.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_full_pipeline_runs_against_fakes() {
        let dir = tempfile::tempdir().unwrap();
        let mut hosts = FakeHostSet::new();
        hosts.config.runtime.profile_path =
            dir.path().join(".bashrc").display().to_string();
        hosts.config.proxy.cert_dir = dir.path().join("certs").display().to_string();
        hosts.config.proxy.site_path =
            dir.path().join("sites-available/rigup.conf").display().to_string();
        hosts.config.proxy.enabled_path =
            dir.path().join("sites-enabled/rigup.conf").display().to_string();
        hosts.config.proxy.default_site =
            dir.path().join("sites-enabled/default").display().to_string();
        hosts.config.frontend.dir = dir.path().join("frontend");
        hosts.config.backend.dir = dir.path().join("backend");
        hosts.config.backend.mount_point = dir.path().join("shared");
        hosts.config.health.script_path = dir.path().join("health_check.sh");
        let ctx = hosts.context();

        let report = Pipeline::standard().run(&ctx).await;

        assert!(report.succeeded(), "aborted: {:?}", report.aborted);
        assert_eq!(report.steps.len(), 8);
        assert!(dir.path().join("health_check.sh").exists());
    }
}
