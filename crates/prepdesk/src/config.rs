//! Configuration file loading and parsing.
//!
//! Prepdesk reads repository-level configuration from `config.toml` inside
//! the data directory. All sections are optional; a missing file falls back
//! to defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure loaded from `<data-dir>/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrepConfig {
    /// Access-control configuration (optional).
    pub access: Option<AccessConfig>,
    /// Server configuration (optional).
    pub server: Option<ServerConfig>,
}

/// Access-control configuration.
///
/// Replaces a hardcoded admin identity: accounts listed here may mutate
/// content through the admin surfaces.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Account ids with the admin role (default: empty).
    pub admins: Option<Vec<String>>,
}

impl AccessConfig {
    /// Get the admin list with default fallback.
    pub fn admins(&self) -> Vec<String> {
        self.admins.clone().unwrap_or_default()
    }
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Listen address (default: "0.0.0.0:3000").
    pub addr: Option<String>,
}

impl ServerConfig {
    /// Get the listen address with default fallback.
    pub fn addr(&self) -> String {
        self.addr
            .clone()
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
    }
}

impl PrepConfig {
    /// Load configuration from `<data-dir>/config.toml`.
    ///
    /// A missing file yields the default configuration; a present but
    /// malformed file is an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Access section with default fallback.
    pub fn access(&self) -> AccessConfig {
        self.access.clone().unwrap_or_default()
    }

    /// Server section with default fallback.
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = PrepConfig::load(temp.path()).unwrap();
        assert!(config.access().admins().is_empty());
        assert_eq!(config.server().addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_load_full_config() {
        let temp = TempDir::new().unwrap();
        let toml = r#"
[access]
admins = ["admin@example.com", "second@example.com"]

[server]
addr = "127.0.0.1:8080"
"#;
        std::fs::write(temp.path().join("config.toml"), toml).unwrap();

        let config = PrepConfig::load(temp.path()).unwrap();
        assert_eq!(
            config.access().admins(),
            vec!["admin@example.com", "second@example.com"]
        );
        assert_eq!(config.server().addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_config_uses_defaults_elsewhere() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            "[access]\nadmins = [\"a\"]\n",
        )
        .unwrap();

        let config = PrepConfig::load(temp.path()).unwrap();
        assert_eq!(config.access().admins(), vec!["a"]);
        assert_eq!(config.server().addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[access\nbroken").unwrap();
        assert!(PrepConfig::load(temp.path()).is_err());
    }
}
