//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Behavior is entirely
//! configuration-constant driven: paths, domain, expected public address,
//! bucket name and port numbers all live here, with defaults matching the
//! standard deployment layout.

use std::net::Ipv4Addr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

mod apps;
mod logging;
mod template;

pub use apps::{BackendConfig, FrontendConfig, HealthConfig, ModelConfig};
pub use logging::LoggingConfig;

/// Main application configuration.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network placement configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Public hostname the proxy serves.
    pub domain: String,
    /// Elastic IP expected to be attached to this instance.
    pub expected_address: String,
    /// Cloud metadata endpoint returning the public IPv4 as plain text.
    pub metadata_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            domain: "chat.example.com".into(),
            expected_address: "13.203.1.165".into(),
            metadata_url: "http://169.254.169.254/latest/meta-data/public-ipv4".into(),
        }
    }
}

/// Node runtime and shell-profile configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Node major version installed and aliased as default.
    pub node_version: String,
    /// Pinned version of the Node version manager install script.
    pub nvm_version: String,
    /// Shell profile that must export the version-manager path.
    pub profile_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            node_version: "20".into(),
            nvm_version: "0.39.7".into(),
            profile_path: "/root/.bashrc".into(),
        }
    }
}

/// Reverse-proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Bucket holding `fullchain.pem` and `privkey.pem`.
    pub cert_bucket: String,
    /// Directory the TLS artifacts are installed into (mode 0700).
    pub cert_dir: String,
    /// Rendered site configuration path.
    pub site_path: String,
    /// Symlink activating the site.
    pub enabled_path: String,
    /// Distribution default site removed on activation.
    pub default_site: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cert_bucket: "s3://rigup-certs".into(),
            cert_dir: "/etc/nginx/certs".into(),
            site_path: "/etc/nginx/sites-available/rigup.conf".into(),
            enabled_path: "/etc/nginx/sites-enabled/rigup.conf".into(),
            default_site: "/etc/nginx/sites-enabled/default".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Config = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// The embedded configuration template written by `rigup config init`.
    #[must_use]
    pub fn template() -> &'static str {
        template::TEMPLATE
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var("RIGUP_EXPECTED_ADDRESS") {
            if !address.is_empty() {
                self.network.expected_address = address;
            }
        }
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.network.domain.is_empty() {
            return Err(ConfigError::MissingField {
                field: "network.domain",
            }
            .into());
        }
        if self.network.expected_address.parse::<Ipv4Addr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "network.expected_address",
                reason: format!("'{}' is not an IPv4 address", self.network.expected_address),
            }
            .into());
        }
        for (field, url) in [
            ("frontend.repo_url", &self.frontend.repo_url),
            ("backend.repo_url", &self.backend.repo_url),
        ] {
            if url::Url::parse(url).is_err() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("'{url}' is not a valid URL"),
                }
                .into());
            }
        }
        let ports = [self.frontend.port, self.backend.port, self.model.port];
        if ports.contains(&0) {
            return Err(ConfigError::InvalidValue {
                field: "ports",
                reason: "port numbers must be non-zero".into(),
            }
            .into());
        }
        if ports[0] == ports[1] || ports[0] == ports[2] || ports[1] == ports[2] {
            return Err(ConfigError::InvalidValue {
                field: "ports",
                reason: "frontend, backend and model ports must be distinct".into(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests for defaults

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_default_ports_match_deployment_layout() {
        let config = Config::default();
        assert_eq!(config.frontend.port, 8081);
        assert_eq!(config.backend.port, 8000);
        assert_eq!(config.model.port, 11434);
    }

    #[test]
    fn test_default_expected_address() {
        let config = Config::default();
        assert_eq!(config.network.expected_address, "13.203.1.165");
    }

    // Tests for parsing

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.model.name, "llama3");
        assert_eq!(config.runtime.node_version, "20");
    }

    #[test]
    fn test_partial_toml_overrides_section() {
        let config: Config = toml::from_str(
            r#"
            [network]
            domain = "rag.internal"
            expected_address = "10.0.0.7"
            metadata_url = "http://169.254.169.254/latest/meta-data/public-ipv4"
            "#,
        )
        .unwrap();
        assert_eq!(config.network.domain, "rag.internal");
        assert_eq!(config.frontend.port, 8081);
    }

    #[test]
    fn test_template_parses_and_validates() {
        let config: Config = toml::from_str(Config::template()).unwrap();
        config.validate().unwrap();
    }

    // Tests for validation

    #[test]
    fn test_rejects_empty_domain() {
        let mut config = Config::default();
        config.network.domain.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_address() {
        let mut config = Config::default();
        config.network.expected_address = "not-an-ip".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_repo_url() {
        let mut config = Config::default();
        config.backend.repo_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_ports() {
        let mut config = Config::default();
        config.backend.port = config.frontend.port;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_port() {
        let mut config = Config::default();
        config.model.port = 0;
        assert!(config.validate().is_err());
    }
}
