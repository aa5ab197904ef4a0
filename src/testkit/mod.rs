//! Test doubles for the outbound ports.
//!
//! Available to unit tests and, behind the `testkit` feature, to integration
//! tests and downstream consumers that want to exercise the pipeline without
//! a real host.

mod fakes;
mod log;

use std::path::Path;
use std::sync::Arc;

pub use fakes::{
    FakeHost, FakeMetadata, FakeModel, FakeMounts, FakePackages, FakeProber, FakePython,
    FakeRepos, FakeServices, FakeStore, FakeSupervisor, FakeToolchain,
};
pub use log::CallLog;

use crate::app::config::Config;
use crate::app::context::StepContext;

/// One fake per outbound port, all recording into a shared [`CallLog`].
///
/// Mutate `config` before calling [`FakeHostSet::context`]; the context
/// snapshots it. The fakes themselves stay shared, so scripting and
/// assertions work through the set after the context is built.
pub struct FakeHostSet {
    pub log: CallLog,
    pub config: Config,
    pub packages: Arc<FakePackages>,
    pub services: Arc<FakeServices>,
    pub supervisor: Arc<FakeSupervisor>,
    pub mounts: Arc<FakeMounts>,
    pub repos: Arc<FakeRepos>,
    pub toolchain: Arc<FakeToolchain>,
    pub python: Arc<FakePython>,
    pub model: Arc<FakeModel>,
    pub store: Arc<FakeStore>,
    pub metadata: Arc<FakeMetadata>,
    pub prober: Arc<FakeProber>,
    pub host: Arc<FakeHost>,
}

impl FakeHostSet {
    #[must_use]
    pub fn new() -> Self {
        let log = CallLog::new();
        Self {
            config: Config::default(),
            packages: Arc::new(FakePackages::new(log.clone())),
            services: Arc::new(FakeServices::new(log.clone())),
            supervisor: Arc::new(FakeSupervisor::new(log.clone())),
            mounts: Arc::new(FakeMounts::new(log.clone())),
            repos: Arc::new(FakeRepos::new(log.clone())),
            toolchain: Arc::new(FakeToolchain::new(log.clone())),
            python: Arc::new(FakePython::new(log.clone())),
            model: Arc::new(FakeModel::new(log.clone())),
            store: Arc::new(FakeStore::new(log.clone())),
            metadata: Arc::new(FakeMetadata::new()),
            prober: Arc::new(FakeProber::new()),
            host: Arc::new(FakeHost::new(log.clone())),
            log,
        }
    }

    /// Build a step context backed by these fakes.
    #[must_use]
    pub fn context(&self) -> StepContext {
        StepContext {
            config: Arc::new(self.config.clone()),
            packages: self.packages.clone(),
            services: self.services.clone(),
            supervisor: self.supervisor.clone(),
            mounts: self.mounts.clone(),
            repos: self.repos.clone(),
            toolchain: self.toolchain.clone(),
            python: self.python.clone(),
            model: self.model.clone(),
            store: self.store.clone(),
            metadata: self.metadata.clone(),
            prober: self.prober.clone(),
            host: self.host.clone(),
        }
    }
}

impl Default for FakeHostSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A fake-backed context whose shell profile lives at the given path.
#[must_use]
pub fn context_with_profile(profile: &Path) -> StepContext {
    let mut hosts = FakeHostSet::new();
    hosts.config.runtime.profile_path = profile.display().to_string();
    hosts.context()
}
