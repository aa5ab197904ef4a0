//! Command-line interface definitions.
//!
//! Defines the CLI structure for the rigup application using `clap`.
//! The CLI supports subcommands for provisioning the host, checking a
//! finished deployment and managing configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Single-host deployment runbook for the chat stack
#[derive(Parser, Debug)]
#[command(name = "rigup")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the rigup CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision this host end to end (requires root)
    Provision(ProvisionArgs),

    /// Check the state of a provisioned host
    Check(CheckArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `rigup config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `provision` subcommand.
///
/// The pipeline is configuration-driven; the flags here only control how
/// the run is logged and whether anything is actually executed.
#[derive(Parser, Debug)]
pub struct ProvisionArgs {
    /// Path to the configuration file. Defaults apply when it is absent.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,

    /// Print the step plan without touching the host.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file. Defaults apply when it is absent.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}
