//! In-memory fakes for every outbound port.
//!
//! Each fake records its calls in a shared [`CallLog`] and exposes knobs to
//! script failures. Defaults are a healthy host: nothing fails, ports answer
//! immediately, the metadata endpoint is unreachable.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, StepError};
use crate::port::outbound::{
    AppSpec, HostRunner, MetadataSource, ModelRuntime, MountTable, ObjectStore, PackageManager,
    PortProber, ProcessSupervisor, PythonEnv, RepoSync, ServiceManager, Toolchain,
};

use super::log::CallLog;

fn injected(program: &str) -> crate::error::Error {
    StepError::CommandFailed {
        program: program.into(),
        status: "exit status: 1".into(),
        stderr: "injected failure".into(),
    }
    .into()
}

pub struct FakePackages {
    log: CallLog,
}

impl FakePackages {
    pub(super) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl PackageManager for FakePackages {
    async fn install(&self, package: &str) -> Result<()> {
        self.log.push(format!("packages.install {package}"));
        Ok(())
    }
}

pub struct FakeServices {
    log: CallLog,
    restarts: Mutex<HashMap<String, u32>>,
}

impl FakeServices {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            restarts: Mutex::new(HashMap::new()),
        }
    }

    /// Times a unit was restarted.
    pub fn restart_count(&self, unit: &str) -> u32 {
        self.restarts
            .lock()
            .unwrap()
            .get(unit)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ServiceManager for FakeServices {
    async fn daemon_reload(&self) -> Result<()> {
        self.log.push("services.daemon_reload");
        Ok(())
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        self.log.push(format!("services.enable {unit}"));
        Ok(())
    }

    async fn start(&self, unit: &str) -> Result<()> {
        self.log.push(format!("services.start {unit}"));
        Ok(())
    }

    async fn restart(&self, unit: &str) -> Result<()> {
        self.log.push(format!("services.restart {unit}"));
        *self
            .restarts
            .lock()
            .unwrap()
            .entry(unit.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn write_override(&self, unit: &str, _contents: &str) -> Result<()> {
        self.log.push(format!("services.write_override {unit}"));
        Ok(())
    }

    async fn status_line(&self, unit: &str) -> String {
        format!("{unit}: active (fake)")
    }
}

pub struct FakeSupervisor {
    log: CallLog,
    fail_boot: AtomicBool,
    processes: Mutex<Vec<String>>,
}

impl FakeSupervisor {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_boot: AtomicBool::new(false),
            processes: Mutex::new(Vec::new()),
        }
    }

    /// Make boot registration fail from now on.
    pub fn fail_boot_registration(&self) {
        self.fail_boot.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProcessSupervisor for FakeSupervisor {
    async fn ensure_installed(&self) -> Result<()> {
        self.log.push("supervisor.ensure_installed");
        Ok(())
    }

    async fn register_boot(&self) -> Result<()> {
        self.log.push("supervisor.register_boot");
        if self.fail_boot.load(Ordering::SeqCst) {
            return Err(injected("pm2 startup"));
        }
        Ok(())
    }

    async fn delete(&self, name: &str) {
        self.log.push(format!("supervisor.delete {name}"));
        self.processes.lock().unwrap().retain(|p| p != name);
    }

    async fn start(&self, spec: &AppSpec) -> Result<()> {
        let interpreter = spec
            .interpreter
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        self.log.push(format!(
            "supervisor.start {} {} {} {}",
            spec.name,
            spec.script,
            spec.args.join(" "),
            interpreter
        ));
        self.processes.lock().unwrap().push(spec.name.clone());
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        self.log.push("supervisor.save");
        Ok(())
    }

    async fn list(&self) -> Result<String> {
        Ok(self.processes.lock().unwrap().join("\n"))
    }
}

pub struct FakeMounts {
    log: CallLog,
    mounted: AtomicBool,
    fail: AtomicBool,
}

impl FakeMounts {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            mounted: AtomicBool::new(false),
            fail: AtomicBool::new(false),
        }
    }

    /// Pretend the mount point is already mounted.
    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
    }

    /// Make mount attempts fail from now on.
    pub fn fail_mounts(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MountTable for FakeMounts {
    async fn is_mounted(&self, _mount_point: &Path) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    async fn mount_nfs(&self, export: &str, mount_point: &Path, options: &str) -> Result<()> {
        self.log.push(format!(
            "mounts.mount_nfs {export} {} {options}",
            mount_point.display()
        ));
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected("mount"));
        }
        self.mounted.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn persist(&self, entry: &str) -> Result<()> {
        self.log.push(format!("mounts.persist {entry}"));
        Ok(())
    }
}

pub struct FakeRepos {
    log: CallLog,
    fail_pulls: AtomicBool,
}

impl FakeRepos {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_pulls: AtomicBool::new(false),
        }
    }

    /// Make checkout updates fail from now on.
    pub fn fail_pulls(&self) {
        self.fail_pulls.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RepoSync for FakeRepos {
    async fn clone(&self, url: &str, dest: &Path) -> Result<()> {
        self.log
            .push(format!("repos.clone {url} {}", dest.display()));
        // Leave a checkout marker so reruns take the pull path.
        tokio::fs::create_dir_all(dest.join(".git")).await?;
        Ok(())
    }

    async fn pull(&self, dest: &Path) -> Result<()> {
        self.log.push(format!("repos.pull {}", dest.display()));
        if self.fail_pulls.load(Ordering::SeqCst) {
            return Err(injected("git pull"));
        }
        Ok(())
    }
}

pub struct FakeToolchain {
    log: CallLog,
    version: Mutex<Option<String>>,
}

impl FakeToolchain {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            version: Mutex::new(None),
        }
    }

    /// Report the runtime as already installed at the given version.
    pub fn set_installed_version(&self, version: &str) {
        *self.version.lock().unwrap() = Some(version.to_string());
    }
}

#[async_trait]
impl Toolchain for FakeToolchain {
    async fn runtime_version(&self) -> Option<String> {
        self.version.lock().unwrap().clone()
    }

    async fn install_manager(&self, version: &str) -> Result<()> {
        self.log.push(format!("toolchain.install_manager {version}"));
        Ok(())
    }

    async fn install_runtime(&self, version: &str) -> Result<()> {
        self.log.push(format!("toolchain.install_runtime {version}"));
        Ok(())
    }

    async fn set_default(&self, version: &str) -> Result<()> {
        self.log.push(format!("toolchain.set_default {version}"));
        Ok(())
    }

    async fn npm_install(&self, dir: &Path) -> Result<()> {
        self.log
            .push(format!("toolchain.npm_install {}", dir.display()));
        Ok(())
    }
}

pub struct FakePython {
    log: CallLog,
    missing: Mutex<Vec<String>>,
}

impl FakePython {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            missing: Mutex::new(Vec::new()),
        }
    }

    /// Report a module as not importable after the requirements install.
    pub fn set_missing_module(&self, module: &str) {
        self.missing.lock().unwrap().push(module.to_string());
    }
}

#[async_trait]
impl PythonEnv for FakePython {
    async fn create(&self, _venv: &Path) -> Result<()> {
        self.log.push("python.create");
        Ok(())
    }

    async fn install_requirements(&self, _venv: &Path, _requirements: &Path) -> Result<()> {
        self.log.push("python.install_requirements");
        Ok(())
    }

    async fn has_module(&self, _venv: &Path, module: &str) -> bool {
        !self.missing.lock().unwrap().iter().any(|m| m == module)
    }

    async fn install_package(&self, _venv: &Path, package: &str) -> Result<()> {
        self.log.push(format!("python.install_package {package}"));
        Ok(())
    }
}

pub struct FakeModel {
    log: CallLog,
}

impl FakeModel {
    pub(super) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl ModelRuntime for FakeModel {
    async fn install(&self) -> Result<()> {
        self.log.push("model.install");
        Ok(())
    }

    async fn pull(&self, model: &str) -> Result<()> {
        self.log.push(format!("model.pull {model}"));
        Ok(())
    }
}

pub struct FakeStore {
    log: CallLog,
    fail: AtomicBool,
}

impl FakeStore {
    pub(super) fn new(log: CallLog) -> Self {
        Self {
            log,
            fail: AtomicBool::new(false),
        }
    }

    /// Make object downloads fail from now on.
    pub fn fail_fetches(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn fetch(&self, remote: &str, dest: &Path) -> Result<()> {
        self.log
            .push(format!("store.fetch {remote} {}", dest.display()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(injected("aws s3 cp"));
        }
        tokio::fs::write(dest, b"fake object").await?;
        Ok(())
    }
}

pub struct FakeMetadata {
    available: AtomicBool,
    script: Mutex<Vec<String>>,
    fallback: Mutex<String>,
    polls: AtomicU32,
}

impl FakeMetadata {
    pub(super) fn new() -> Self {
        Self {
            available: AtomicBool::new(false),
            script: Mutex::new(Vec::new()),
            fallback: Mutex::new(String::new()),
            polls: AtomicU32::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Answer every poll with the same address.
    pub fn set_address(&self, address: &str) {
        self.script.lock().unwrap().clear();
        *self.fallback.lock().unwrap() = address.to_string();
    }

    /// Answer polls with these addresses in order, then repeat the last.
    pub fn script_addresses(&self, addresses: &[&str]) {
        let mut script: Vec<String> = addresses.iter().map(|a| a.to_string()).collect();
        if let Some(last) = script.last() {
            *self.fallback.lock().unwrap() = last.clone();
        }
        script.reverse();
        *self.script.lock().unwrap() = script;
    }

    /// Number of address polls so far.
    pub fn poll_count(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for FakeMetadata {
    async fn available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn public_ipv4(&self) -> Result<String> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().unwrap().pop();
        let address = match scripted {
            Some(address) => address,
            None => self.fallback.lock().unwrap().clone(),
        };
        if address.is_empty() {
            return Err(StepError::Metadata("no address scripted".into()).into());
        }
        Ok(address)
    }
}

pub struct FakeProber {
    failures: AtomicU32,
    probes: AtomicU32,
}

impl FakeProber {
    pub(super) fn new() -> Self {
        Self {
            failures: AtomicU32::new(0),
            probes: AtomicU32::new(0),
        }
    }

    /// Make the first `count` probes fail. `u32::MAX` never becomes ready.
    pub fn fail_first(&self, count: u32) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Number of probes so far.
    pub fn probe_count(&self) -> u32 {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortProber for FakeProber {
    async fn reachable(&self, _port: u16) -> bool {
        let probe = self.probes.fetch_add(1, Ordering::SeqCst) + 1;
        probe > self.failures.load(Ordering::SeqCst)
    }
}

pub struct FakeHost {
    log: CallLog,
}

impl FakeHost {
    pub(super) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl HostRunner for FakeHost {
    async fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        self.log
            .push(format!("host.run {program} {}", args.join(" ")));
        Ok(())
    }

    async fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        self.log
            .push(format!("host.capture {program} {}", args.join(" ")));
        Ok(String::new())
    }
}
