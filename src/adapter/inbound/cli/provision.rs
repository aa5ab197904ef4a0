//! Handler for the `provision` command.

use std::sync::Arc;

use serde_json::json;

use crate::adapter::inbound::cli::command::ProvisionArgs;
use crate::adapter::inbound::cli::{config::load_or_default, output};
use crate::adapter::outbound::http::{HttpProber, ImdsMetadata};
use crate::adapter::outbound::shell::{
    AptPackages, AwsCliStore, FstabMounts, GitRepoSync, NvmToolchain, OllamaRuntime,
    Pm2Supervisor, ShellRunner, SystemdServices, VenvPython,
};
use crate::app::config::Config;
use crate::app::context::StepContext;
use crate::app::pipeline::Pipeline;
use crate::domain::outcome::RunReport;
use crate::error::{Result, StepError};

/// Execute the provision command.
pub async fn execute(args: &ProvisionArgs) -> Result<()> {
    let mut config = load_or_default(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".into();
    }

    let pipeline = Pipeline::standard();

    if args.dry_run {
        print_plan(&pipeline);
        return Ok(());
    }

    ensure_root()?;
    config.logging.init();

    if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Domain", &config.network.domain);
        output::field("Address", &config.network.expected_address);
        output::field("Config", args.config.display());
    }

    let ctx = build_context(config);
    let report = pipeline.run(&ctx).await;
    print_report(&report)
}

/// Every step mutates system state: package installs, service restarts,
/// mount-table edits. Refuse early rather than fail eight commands in.
fn ensure_root() -> Result<()> {
    // SAFETY: geteuid has no preconditions and cannot fail.
    let euid = unsafe { libc::geteuid() };
    if euid != 0 {
        return Err(StepError::Precondition("must run as root (try sudo)".into()).into());
    }
    Ok(())
}

fn print_plan(pipeline: &Pipeline) {
    if output::is_json() {
        output::json_output(json!({
            "command": "provision",
            "dry_run": true,
            "plan": pipeline.plan(),
        }));
        return;
    }
    output::section("Provisioning Plan");
    for (index, name) in pipeline.plan().iter().enumerate() {
        output::note(&format!("{}. {name}", index + 1));
    }
    output::hint("run without --dry-run (as root) to apply");
}

/// Wire the real host adapters behind the step context.
fn build_context(config: Config) -> StepContext {
    let metadata = ImdsMetadata::new(config.network.metadata_url.clone());
    let model = OllamaRuntime::new(config.model.install_url.clone());
    StepContext {
        config: Arc::new(config),
        packages: Arc::new(AptPackages),
        services: Arc::new(SystemdServices::default()),
        supervisor: Arc::new(Pm2Supervisor),
        mounts: Arc::new(FstabMounts::default()),
        repos: Arc::new(GitRepoSync),
        toolchain: Arc::new(NvmToolchain),
        python: Arc::new(VenvPython),
        model: Arc::new(model),
        store: Arc::new(AwsCliStore),
        metadata: Arc::new(metadata),
        prober: Arc::new(HttpProber::new()),
        host: Arc::new(ShellRunner),
    }
}

fn print_report(report: &RunReport) -> Result<()> {
    if output::is_json() {
        let steps = report
            .steps
            .iter()
            .map(|step| {
                json!({
                    "step": step.step,
                    "warnings": step.outcome.warnings(),
                })
            })
            .collect::<Vec<_>>();
        output::json_output(json!({
            "command": "provision",
            "started_at": report.started_at.to_rfc3339(),
            "finished_at": report.finished_at.to_rfc3339(),
            "succeeded": report.succeeded(),
            "steps": steps,
            "aborted": report.aborted.as_ref().map(|abort| json!({
                "step": abort.step,
                "error": abort.error,
            })),
        }));
    } else {
        output::section("Run Report");
        for step in &report.steps {
            let warnings = step.outcome.warnings();
            if warnings.is_empty() {
                output::success(step.step);
            } else {
                for warning in warnings {
                    output::warning(&format!("{}: {warning}", step.step));
                }
            }
        }
    }

    match &report.aborted {
        Some(abort) => {
            output::error(&format!("{} failed: {}", abort.step, abort.error));
            Err(StepError::Aborted {
                step: abort.step,
                reason: abort.error.clone(),
            }
            .into())
        }
        None => {
            if !output::is_json() {
                output::success("Provisioning complete");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::{Abort, StepOutcome, StepReport};
    use chrono::Utc;

    fn report_with(aborted: Option<Abort>) -> RunReport {
        RunReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            steps: vec![StepReport {
                step: "bootstrap",
                outcome: StepOutcome::Success,
            }],
            aborted,
        }
    }

    #[test]
    fn test_successful_report_is_ok() {
        assert!(print_report(&report_with(None)).is_ok());
    }

    #[test]
    fn test_aborted_report_is_an_error() {
        let err = print_report(&report_with(Some(Abort {
            step: "model",
            error: "ollama not ready after 15 probe attempts".into(),
        })))
        .unwrap_err();
        assert!(err.to_string().contains("model"));
    }
}
