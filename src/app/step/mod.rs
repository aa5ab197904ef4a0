//! The provisioning steps, one module per stage of the pipeline.

pub mod address;
pub mod backend;
pub mod bootstrap;
pub mod frontend;
pub mod health;
pub mod model;
pub mod proxy;
pub mod runtime;

use async_trait::async_trait;

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::error::Result;

pub use address::AddressWaiter;
pub use backend::BackendDeployer;
pub use bootstrap::EnvBootstrap;
pub use frontend::FrontendDeployer;
pub use health::HealthCheckEmitter;
pub use model::ModelRuntimeInstaller;
pub use proxy::ProxyConfigurator;
pub use runtime::RuntimeInstaller;

/// One stage of the provisioning pipeline.
///
/// Returning `Err` is fatal and stops the run; tolerated conditions are
/// reported through [`StepOutcome::Tolerated`] and the run continues.
/// Every step must be idempotent, because re-running the whole pipeline is
/// the only recovery mechanism after an abort.
#[async_trait]
pub trait ProvisionStep: Send + Sync {
    /// Stable name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Apply this stage to the host.
    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome>;
}
