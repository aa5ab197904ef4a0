//! Repository cloning and updating via git.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::RepoSync;

use super::run_checked;

/// git adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRepoSync;

#[async_trait]
impl RepoSync for GitRepoSync {
    async fn clone(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        info!(repo = %url, dest = %dest.display(), "Cloning repository");
        run_checked("git", &["clone", url, &dest.display().to_string()]).await
    }

    async fn pull(&self, dest: &Path) -> Result<()> {
        info!(dest = %dest.display(), "Updating checkout");
        run_checked(
            "git",
            &["-C", &dest.display().to_string(), "pull", "--ff-only"],
        )
        .await
    }
}
