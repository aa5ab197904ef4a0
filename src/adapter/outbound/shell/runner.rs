//! Generic host command adapter.

use async_trait::async_trait;

use crate::error::Result;
use crate::port::outbound::HostRunner;

use super::{run_capture, run_checked};

/// Runs one-off host commands directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

#[async_trait]
impl HostRunner for ShellRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        run_checked(program, args).await
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        run_capture(program, args).await
    }
}
