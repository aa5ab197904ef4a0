//! Shell-backed adapters.
//!
//! Each adapter implements one outbound port by driving the corresponding
//! host tool (`apt-get`, `systemctl`, `pm2`, `mount`, `git`, `nvm`,
//! `ollama`, `aws`) through `tokio::process`. Failures carry the program
//! name, exit status and a stderr tail so the run log points at the command
//! that broke the pipeline.

pub mod apt;
pub mod git;
pub mod mount;
pub mod nvm;
pub mod ollama;
pub mod pm2;
pub mod runner;
pub mod s3;
pub mod systemd;
pub mod venv;

pub use apt::AptPackages;
pub use git::GitRepoSync;
pub use mount::FstabMounts;
pub use nvm::NvmToolchain;
pub use ollama::OllamaRuntime;
pub use pm2::Pm2Supervisor;
pub use runner::ShellRunner;
pub use s3::AwsCliStore;
pub use systemd::SystemdServices;
pub use venv::VenvPython;

use tokio::process::Command;

use crate::error::{Result, StepError};

/// Run a command, failing on spawn error or non-zero exit.
pub(crate) async fn run_checked(program: &str, args: &[&str]) -> Result<()> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| StepError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(command_failed(program, output.status, &output.stderr).into())
    }
}

/// Run a command and capture trimmed stdout, failing on non-zero exit.
pub(crate) async fn run_capture(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| StepError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(command_failed(program, output.status, &output.stderr).into())
    }
}

/// Run a command and report only whether it exited zero.
pub(crate) async fn run_ok(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run a snippet under a login shell.
///
/// The Node version manager is a shell function, not a binary, so anything
/// touching it has to go through `bash -lc` with the profile sourced.
pub(crate) async fn run_login_shell(script: &str) -> Result<()> {
    run_checked("bash", &["-lc", script]).await
}

/// Capture trimmed stdout from a snippet run under a login shell.
pub(crate) async fn capture_login_shell(script: &str) -> Result<String> {
    run_capture("bash", &["-lc", script]).await
}

fn command_failed(program: &str, status: std::process::ExitStatus, stderr: &[u8]) -> StepError {
    StepError::CommandFailed {
        program: program.to_string(),
        status: status
            .code()
            .map_or_else(|| "signal".to_string(), |code| code.to_string()),
        stderr: stderr_tail(stderr),
    }
}

/// Last few lines of stderr, enough to identify the failure without
/// flooding the run log.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() <= 4 {
        trimmed.to_string()
    } else {
        lines[lines.len() - 4..].join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_short_output_unchanged() {
        assert_eq!(stderr_tail(b"  error: not found\n"), "error: not found");
    }

    #[test]
    fn test_stderr_tail_keeps_last_four_lines() {
        let input = b"a\nb\nc\nd\ne\nf";
        assert_eq!(stderr_tail(input), "c\nd\ne\nf");
    }

    #[test]
    fn test_stderr_tail_lossy_on_invalid_utf8() {
        let tail = stderr_tail(&[0xff, 0xfe, b'o', b'k']);
        assert!(tail.contains("ok"));
    }
}
