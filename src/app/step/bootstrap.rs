//! Environment bootstrap: shell-profile marker for the version manager.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;

use super::ProvisionStep;

/// Lines a later interactive shell needs to find the Node version manager.
const NVM_LOADER: &str = r#"export NVM_DIR="$HOME/.nvm"
[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh""#;

/// Substring whose presence means the loader block was already appended.
const MARKER: &str = "NVM_DIR";

/// Ensures the shell profile sources the version manager.
pub struct EnvBootstrap;

#[async_trait]
impl ProvisionStep for EnvBootstrap {
    fn name(&self) -> &'static str {
        "bootstrap"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let profile = &ctx.config.runtime.profile_path;
        let current = match tokio::fs::read_to_string(profile).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        if current.contains(MARKER) {
            debug!(profile, "Version-manager loader already in profile");
            return Ok(StepOutcome::Success);
        }

        let mut updated = current;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(NVM_LOADER);
        updated.push('\n');
        tokio::fs::write(profile, updated).await?;
        info!(profile, "Appended version-manager loader to profile");
        Ok(StepOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::context_with_profile;

    async fn run_bootstrap(ctx: &StepContext) {
        let outcome = EnvBootstrap.execute(ctx).await.unwrap();
        assert_eq!(outcome, StepOutcome::Success);
    }

    #[tokio::test]
    async fn test_appends_loader_to_existing_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".bashrc");
        std::fs::write(&profile, "alias ll='ls -l'\n").unwrap();
        let ctx = context_with_profile(&profile);

        run_bootstrap(&ctx).await;

        let contents = std::fs::read_to_string(&profile).unwrap();
        assert!(contents.starts_with("alias ll='ls -l'\n"));
        assert!(contents.contains("NVM_DIR"));
    }

    #[tokio::test]
    async fn test_creates_missing_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".bashrc");
        let ctx = context_with_profile(&profile);

        run_bootstrap(&ctx).await;

        assert!(std::fs::read_to_string(&profile)
            .unwrap()
            .contains("NVM_DIR"));
    }

    #[tokio::test]
    async fn test_running_twice_leaves_one_marker() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".bashrc");
        let ctx = context_with_profile(&profile);

        run_bootstrap(&ctx).await;
        run_bootstrap(&ctx).await;

        let contents = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(contents.matches("NVM_DIR=\"$HOME/.nvm\"").count(), 1);
    }
}
