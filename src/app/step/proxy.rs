//! Reverse-proxy install and site configuration.

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::config::Config;
use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;

use super::ProvisionStep;

/// TLS artifacts fetched from the certificate bucket.
const CERT_OBJECTS: [&str; 2] = ["fullchain.pem", "privkey.pem"];

/// Installs nginx, stages TLS artifacts, renders and activates the site.
pub struct ProxyConfigurator;

/// Render the site configuration.
///
/// Three routed upstreams: `/` to the frontend (with upgrade headers for
/// its persistent connections), `/chat` to the backend, and `/ollama/` to
/// the model runtime — the trailing slash on the upstream strips the
/// prefix before forwarding.
pub fn render_site_config(config: &Config) -> String {
    format!(
        r#"server {{
    listen 80;
    server_name {domain};
    return 301 https://$host$request_uri;
}}

server {{
    listen 443 ssl;
    server_name {domain};

    ssl_certificate {cert_dir}/fullchain.pem;
    ssl_certificate_key {cert_dir}/privkey.pem;

    location / {{
        proxy_pass http://127.0.0.1:{frontend_port};
        proxy_http_version 1.1;
        proxy_set_header Upgrade $http_upgrade;
        proxy_set_header Connection "upgrade";
        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_read_timeout 300s;
    }}

    location /chat {{
        proxy_pass http://127.0.0.1:{backend_port};
        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_read_timeout 300s;
    }}

    location /ollama/ {{
        proxy_pass http://127.0.0.1:{model_port}/;
        proxy_set_header Host $host;
        proxy_read_timeout 600s;
    }}
}}
"#,
        domain = config.network.domain,
        cert_dir = config.proxy.cert_dir,
        frontend_port = config.frontend.port,
        backend_port = config.backend.port,
        model_port = config.model.port,
    )
}

async fn stage_certificates(ctx: &StepContext, warnings: &mut Vec<String>) -> Result<()> {
    let proxy = &ctx.config.proxy;
    let cert_dir = Path::new(&proxy.cert_dir);
    tokio::fs::create_dir_all(cert_dir).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(cert_dir, std::fs::Permissions::from_mode(0o700)).await?;
    }

    for object in CERT_OBJECTS {
        let remote = format!("{}/{object}", proxy.cert_bucket.trim_end_matches('/'));
        let dest = cert_dir.join(object);
        // The proxy is installable without valid certs; it will fail TLS
        // handshakes until a later run stages them.
        if let Err(err) = ctx.store.fetch(&remote, &dest).await {
            warn!(object, error = %err, "TLS artifact download failed");
            warnings.push(format!("TLS artifact {object} not staged: {err}"));
        }
    }
    Ok(())
}

fn activate_site(site_path: &Path, enabled_path: &Path, default_site: &Path) -> Result<()> {
    // Re-linking on re-runs: drop any stale link first.
    match std::fs::remove_file(enabled_path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    #[cfg(unix)]
    std::os::unix::fs::symlink(site_path, enabled_path)?;
    // The distribution default site would shadow our server block.
    let _ = std::fs::remove_file(default_site);
    Ok(())
}

#[async_trait]
impl ProvisionStep for ProxyConfigurator {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        let proxy = &ctx.config.proxy;
        ctx.packages.install("nginx").await?;

        let mut warnings = Vec::new();
        stage_certificates(ctx, &mut warnings).await?;

        let site_path = Path::new(&proxy.site_path);
        if let Some(parent) = site_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let enabled_path = Path::new(&proxy.enabled_path);
        if let Some(parent) = enabled_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(site_path, render_site_config(&ctx.config)).await?;
        activate_site(site_path, enabled_path, Path::new(&proxy.default_site))?;

        // Syntax check before touching the running service.
        ctx.host.run("nginx", &["-t"]).await?;
        ctx.services.restart("nginx").await?;
        info!("Reverse proxy configured and restarted");

        if warnings.is_empty() {
            Ok(StepOutcome::Success)
        } else {
            Ok(StepOutcome::Tolerated(warnings))
        }
    }
}
