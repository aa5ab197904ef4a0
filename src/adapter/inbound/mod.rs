//! Inbound adapters (the CLI).

pub mod cli;
