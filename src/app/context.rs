//! Collaborators injected into every provisioning step.

use std::sync::Arc;

use crate::app::config::Config;
use crate::port::outbound::{
    HostRunner, MetadataSource, ModelRuntime, MountTable, ObjectStore, PackageManager,
    PortProber, ProcessSupervisor, PythonEnv, RepoSync, ServiceManager, Toolchain,
};

/// Everything a step is allowed to touch.
///
/// Steps receive the host exclusively through these ports; swapping them for
/// fakes is how the pipeline is tested without a machine.
pub struct StepContext {
    pub config: Arc<Config>,
    pub packages: Arc<dyn PackageManager>,
    pub services: Arc<dyn ServiceManager>,
    pub supervisor: Arc<dyn ProcessSupervisor>,
    pub mounts: Arc<dyn MountTable>,
    pub repos: Arc<dyn RepoSync>,
    pub toolchain: Arc<dyn Toolchain>,
    pub python: Arc<dyn PythonEnv>,
    pub model: Arc<dyn ModelRuntime>,
    pub store: Arc<dyn ObjectStore>,
    pub metadata: Arc<dyn MetadataSource>,
    pub prober: Arc<dyn PortProber>,
    pub host: Arc<dyn HostRunner>,
}
