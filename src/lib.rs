//! rigup - single-host deployment runbook for the chat stack.
//!
//! Provisions one Linux host end to end: Node runtime and process
//! supervisor, elastic-IP verification, TLS reverse proxy, frontend and
//! backend deployments, the shared NFS mount, the local model runtime and
//! a standalone diagnostic script. The whole run is an ordered, fail-fast
//! pipeline of idempotent steps; re-running after a fix is the recovery
//! mechanism.
//!
//! # Architecture
//!
//! Hexagonal. Steps in [`app::step`] orchestrate; every interaction with
//! the host goes through an outbound port in [`port::outbound`], and the
//! concrete adapters in [`adapter::outbound`] drive the real tools
//! (`apt-get`, `systemctl`, `pm2`, `git`, `nvm`, `mount`, `ollama`, `aws`)
//! or the IMDS endpoint. Swapping the ports for the fakes in [`testkit`]
//! is how the orchestration is tested without a machine.
//!
//! # Modules
//!
//! - [`app`] - configuration, step context, the steps and the pipeline
//! - [`domain`] - outcome model and bounded retry policy (no I/O)
//! - [`port`] - trait boundary between steps and the host
//! - [`adapter`] - CLI on the inbound side, shell/HTTP on the outbound side
//! - [`error`] - error types for the crate
//!
//! # Features
//!
//! - `testkit` - export the in-memory fakes for integration tests

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
