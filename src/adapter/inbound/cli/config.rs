//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::app::config::Config;
use crate::error::{ConfigError, Result};

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, Config::template())?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: rigup config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: sudo rigup provision -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = load_or_default(path)?;

    output::section("Network");
    output::field("Domain", &config.network.domain);
    output::field("Address", &config.network.expected_address);
    if output::verbosity() > 0 {
        output::field("Metadata", &config.network.metadata_url);
    }

    output::section("Runtime");
    output::field("Node", &config.runtime.node_version);
    output::field("nvm", &config.runtime.nvm_version);
    output::field("Profile", &config.runtime.profile_path);

    output::section("Proxy");
    output::field("Cert bucket", &config.proxy.cert_bucket);
    output::field("Cert dir", &config.proxy.cert_dir);
    output::field("Site", &config.proxy.site_path);

    output::section("Frontend");
    output::field("Repo", &config.frontend.repo_url);
    output::field("Dir", config.frontend.dir.display());
    output::field("Port", config.frontend.port);

    output::section("Backend");
    output::field("Repo", &config.backend.repo_url);
    output::field("Dir", config.backend.dir.display());
    output::field("Port", config.backend.port);
    output::field("Export", &config.backend.nfs_export);
    output::field("Mount", config.backend.mount_point.display());

    output::section("Model");
    output::field("Name", &config.model.name);
    output::field("Service", &config.model.service);
    output::field("Port", config.model.port);

    output::section("Health");
    output::field("Script", config.health.script_path.display());

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field("Next", format!("rigup config show -c {}", path.display()));
    Ok(())
}

/// Load a config file, falling back to defaults when it does not exist.
///
/// `provision` and `check` share this: a fresh host has no config file yet
/// and the defaults describe the standard deployment.
pub(super) fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    // Tests for execute_init

    #[test]
    fn test_execute_init_creates_file() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");

        let result = execute_init(&config_path, false);
        assert!(result.is_ok());
        assert!(config_path.exists());
    }

    #[test]
    fn test_execute_init_writes_template_content() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");

        execute_init(&config_path, false).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, Config::template());
    }

    #[test]
    fn test_execute_init_creates_parent_directories() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir
            .path()
            .join("nested")
            .join("dir")
            .join("config.toml");

        let result = execute_init(&config_path, false);
        assert!(result.is_ok());
        assert!(config_path.exists());
    }

    #[test]
    fn test_execute_init_fails_if_file_exists_without_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        let result = execute_init(&config_path, false);
        assert!(result.is_err());

        // Original content is preserved
        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, "existing content");
    }

    #[test]
    fn test_execute_init_overwrites_with_force() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        let result = execute_init(&config_path, true);
        assert!(result.is_ok());

        let content = fs::read_to_string(&config_path).unwrap();
        assert_eq!(content, Config::template());
    }

    #[test]
    fn test_execute_init_error_contains_force_hint() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "existing content").unwrap();

        let error = execute_init(&config_path, false).unwrap_err();
        assert!(
            error.to_string().contains("--force"),
            "Error should mention --force flag"
        );
    }

    // Tests for execute_validate

    #[test]
    fn test_execute_validate_accepts_template() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        execute_init(&config_path, false).unwrap();

        assert!(execute_validate(&config_path).is_ok());
    }

    #[test]
    fn test_execute_validate_rejects_bad_toml() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "this is not toml [[[").unwrap();

        assert!(execute_validate(&config_path).is_err());
    }

    #[test]
    fn test_execute_validate_rejects_missing_file() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("nope.toml");

        assert!(execute_validate(&config_path).is_err());
    }

    // Tests for load_or_default

    #[test]
    fn test_load_or_default_missing_file_uses_defaults() {
        let temp_dir = create_temp_dir();
        let config = load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.frontend.port, 8081);
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let temp_dir = create_temp_dir();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[network]\ndomain = \"rag.internal\"\nexpected_address = \"10.0.0.7\"\nmetadata_url = \"http://169.254.169.254/latest/meta-data/public-ipv4\"\n",
        )
        .unwrap();

        let config = load_or_default(&config_path).unwrap();
        assert_eq!(config.network.domain, "rag.internal");
    }
}
