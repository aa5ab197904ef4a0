//! Health-check script emitter.

use async_trait::async_trait;
use tracing::info;

use crate::app::config::Config;
use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;

use super::ProvisionStep;

/// Writes the standalone diagnostic script operators run by hand.
pub struct HealthCheckEmitter;

/// Render the diagnostic script.
///
/// Pure read-only observability: list supervised processes, service status,
/// mount presence and per-port reachability. Always exits 0 so it can run
/// from cron or a shell without ceremony.
pub fn render_health_script(config: &Config) -> String {
    format!(
        r#"#!/bin/sh
# Host diagnostics for the {domain} deployment. Read-only.

echo "== supervised processes =="
pm2 list || true

echo ""
echo "== services =="
systemctl status nginx --no-pager 2>/dev/null | head -n 3 || true
systemctl status {service} --no-pager 2>/dev/null | head -n 3 || true

echo ""
echo "== shared data mount =="
if mountpoint -q {mount_point}; then
    echo "mounted: {mount_point}"
else
    echo "NOT mounted: {mount_point}"
fi

echo ""
echo "== ports =="
for port in {frontend_port} {backend_port} {model_port}; do
    if curl -s -o /dev/null --max-time 5 "http://127.0.0.1:${{port}}/"; then
        echo "port ${{port}}: reachable"
    else
        echo "port ${{port}}: unreachable"
    fi
done

exit 0
"#,
        domain = config.network.domain,
        service = config.model.service,
        mount_point = config.backend.mount_point.display(),
        frontend_port = config.frontend.port,
        backend_port = config.backend.port,
        model_port = config.model.port,
    )
}

#[async_trait]
impl ProvisionStep for HealthCheckEmitter {
    fn name(&self) -> &'static str {
        "health"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let path = &ctx.config.health.script_path;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, render_health_script(&ctx.config)).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
        }
        info!(path = %path.display(), "Wrote diagnostic script");
        Ok(StepOutcome::Success)
    }
}
