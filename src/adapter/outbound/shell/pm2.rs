//! Process supervision via PM2.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::port::outbound::{AppSpec, ProcessSupervisor};

use super::{capture_login_shell, run_capture, run_checked, run_ok};

/// PM2 adapter.
///
/// PM2 arrives via npm, which lives behind the version manager, so the
/// install path goes through a login shell; day-to-day process control uses
/// the `pm2` binary directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pm2Supervisor;

#[async_trait]
impl ProcessSupervisor for Pm2Supervisor {
    async fn ensure_installed(&self) -> Result<()> {
        if run_ok("bash", &["-lc", "command -v pm2"]).await {
            debug!("pm2 already installed");
            return Ok(());
        }
        info!("Installing pm2");
        capture_login_shell("npm install -g pm2").await.map(|_| ())
    }

    async fn register_boot(&self) -> Result<()> {
        capture_login_shell("pm2 startup systemd -u root --hp /root")
            .await
            .map(|_| ())
    }

    async fn delete(&self, name: &str) {
        // Missing process names make pm2 exit non-zero; that is the normal
        // first-run case.
        let _ = run_ok("pm2", &["delete", name]).await;
    }

    async fn start(&self, spec: &AppSpec) -> Result<()> {
        let cwd = spec.cwd.display().to_string();
        let mut args: Vec<String> = vec![
            "start".into(),
            spec.script.clone(),
            "--name".into(),
            spec.name.clone(),
            "--cwd".into(),
            cwd,
        ];
        if let Some(interpreter) = &spec.interpreter {
            args.push("--interpreter".into());
            args.push(interpreter.display().to_string());
        }
        if !spec.args.is_empty() {
            args.push("--".into());
            args.extend(spec.args.iter().cloned());
        }

        info!(app = %spec.name, "Starting supervised process");
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let mut command = tokio::process::Command::new("pm2");
        command.args(&arg_refs);
        for (key, value) in &spec.env {
            command.env(key, value);
        }
        let output = command
            .output()
            .await
            .map_err(|source| crate::error::StepError::Spawn {
                program: "pm2".to_string(),
                source,
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(crate::error::StepError::CommandFailed {
                program: "pm2".to_string(),
                status: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into())
        }
    }

    async fn save(&self) -> Result<()> {
        run_checked("pm2", &["save"]).await
    }

    async fn list(&self) -> Result<String> {
        run_capture("pm2", &["list"]).await
    }
}
