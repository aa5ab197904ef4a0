//! Outbound ports: one trait per external system the pipeline touches.
//!
//! The provisioning steps never shell out or open sockets directly. Every
//! interaction with the host — package manager, service manager, process
//! supervisor, mount table, git, the Node toolchain, the Python environment,
//! the model runtime, object storage, the cloud metadata endpoint and local
//! port probes — goes through one of these traits, so the orchestration can
//! be exercised against fakes without a real machine.

pub mod host;
pub mod model;
pub mod mounts;
pub mod net;
pub mod packages;
pub mod python;
pub mod repos;
pub mod services;
pub mod store;
pub mod supervisor;
pub mod toolchain;

pub use host::HostRunner;
pub use model::ModelRuntime;
pub use mounts::MountTable;
pub use net::{MetadataSource, PortProber};
pub use packages::PackageManager;
pub use python::PythonEnv;
pub use repos::RepoSync;
pub use services::ServiceManager;
pub use store::ObjectStore;
pub use supervisor::{AppSpec, ProcessSupervisor};
pub use toolchain::Toolchain;
