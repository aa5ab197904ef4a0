//! Handler for the `check` command.
//!
//! In-process rendition of the emitted diagnostic script: reads the same
//! signals (supervised processes, services, mount, ports) through the
//! outbound ports instead of shelling out. Always exits zero; the point is
//! to show state, not to gate anything.

use crate::adapter::inbound::cli::command::CheckArgs;
use crate::adapter::inbound::cli::{config::load_or_default, output};
use crate::adapter::outbound::http::HttpProber;
use crate::adapter::outbound::shell::{FstabMounts, Pm2Supervisor, SystemdServices};
use crate::error::Result;
use crate::port::outbound::{MountTable, PortProber, ProcessSupervisor, ServiceManager};

/// Execute the check command.
pub async fn execute(args: &CheckArgs) -> Result<()> {
    let config = load_or_default(&args.config)?;

    let supervisor = Pm2Supervisor;
    let services = SystemdServices::default();
    let mounts = FstabMounts::default();
    let prober = HttpProber::new();

    output::section("Supervised Processes");
    match supervisor.list().await {
        Ok(listing) if !listing.trim().is_empty() => output::lines(&listing),
        Ok(_) => output::note("(none)"),
        Err(err) => output::warning(&format!("supervisor unavailable: {err}")),
    }

    output::section("Services");
    for unit in ["nginx", config.model.service.as_str()] {
        output::field(unit, services.status_line(unit).await);
    }

    output::section("Shared Data Mount");
    let mount_point = &config.backend.mount_point;
    if mounts.is_mounted(mount_point).await {
        output::success(&format!("mounted: {}", mount_point.display()));
    } else {
        output::warning(&format!("NOT mounted: {}", mount_point.display()));
    }

    output::section("Ports");
    for (label, port) in [
        ("frontend", config.frontend.port),
        ("backend", config.backend.port),
        ("model", config.model.port),
    ] {
        if prober.reachable(port).await {
            output::success(&format!("{label} ({port}): reachable"));
        } else {
            output::warning(&format!("{label} ({port}): unreachable"));
        }
    }

    Ok(())
}
