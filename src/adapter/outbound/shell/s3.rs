//! Object fetches via the AWS CLI.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::ObjectStore;

use super::run_checked;

/// `aws s3 cp` adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsCliStore;

#[async_trait]
impl ObjectStore for AwsCliStore {
    async fn fetch(&self, remote: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        info!(remote, dest = %dest.display(), "Fetching object");
        run_checked("aws", &["s3", "cp", remote, &dest.display().to_string()]).await
    }
}
