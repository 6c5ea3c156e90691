//! Configuration management for Keystack
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (KEYSTACK_* prefix, highest precedence)
//! 2. keystack.local.toml (gitignored, local overrides)
//! 3. keystack.toml (git-tracked, project config)
//! 4. ~/.config/keystack/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! The configuration decides which key managers a registry starts with and
//! whether each key type may still mint new keys.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Keystack configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystackConfig {
    pub registry: RegistryConfig,
}

/// Which built-in key managers a registry registers at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// HMAC managers.
    pub mac: bool,
    /// AES-GCM managers.
    pub aead: bool,
    /// ECDSA and Ed25519 sign/verify managers.
    pub signature: bool,
    /// Per-type overrides applied after the catalogues are registered.
    pub key_types: Vec<KeyTypeEntry>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mac: true,
            aead: true,
            signature: true,
            key_types: Vec::new(),
        }
    }
}

/// Override for a single registered key type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTypeEntry {
    pub type_url: String,
    #[serde(default = "default_new_key_allowed")]
    pub new_key_allowed: bool,
}

fn default_new_key_allowed() -> bool {
    true
}

impl KeystackConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Read a single TOML file without layering.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Registry with only the MAC catalogue.
    pub fn mac_only() -> Self {
        Self {
            registry: RegistryConfig {
                mac: true,
                aead: false,
                signature: false,
                key_types: Vec::new(),
            },
        }
    }

    /// Checks cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()
    }
}

impl RegistryConfig {
    /// Rejects empty and duplicate type URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.key_types {
            if entry.type_url.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "registry.key_types entry has an empty type_url".to_string(),
                ));
            }
            if !seen.insert(entry.type_url.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "registry.key_types lists '{}' more than once",
                    entry.type_url
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(type_url: &str, new_key_allowed: bool) -> KeyTypeEntry {
        KeyTypeEntry {
            type_url: type_url.to_string(),
            new_key_allowed,
        }
    }

    #[test]
    fn test_default_config() {
        let config = KeystackConfig::default();
        assert!(config.registry.mac);
        assert!(config.registry.aead);
        assert!(config.registry.signature);
        assert!(config.registry.key_types.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mac_only_config() {
        let config = KeystackConfig::mac_only();
        assert!(config.registry.mac);
        assert!(!config.registry.aead);
        assert!(!config.registry.signature);
    }

    #[test]
    fn test_validate_rejects_empty_type_url() {
        let mut config = KeystackConfig::default();
        config.registry.key_types.push(entry("  ", true));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = KeystackConfig::default();
        config.registry.key_types.push(entry("type.a", true));
        config.registry.key_types.push(entry("type.a", false));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("keystack.toml");
        std::fs::write(
            &path,
            r#"
[registry]
aead = false

[[registry.key_types]]
type_url = "type.a"
new_key_allowed = false

[[registry.key_types]]
type_url = "type.b"
"#,
        )
        .expect("Failed to write config");

        let config = KeystackConfig::from_file(&path).expect("Failed to read config");

        assert!(config.registry.mac);
        assert!(!config.registry.aead);
        assert_eq!(
            config.registry.key_types,
            vec![entry("type.a", false), entry("type.b", true)]
        );
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("keystack.toml");
        std::fs::write(&path, "[registry\nmac = 3").expect("Failed to write config");

        assert!(matches!(
            KeystackConfig::from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_from_file_reports_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        assert!(matches!(
            KeystackConfig::from_file(temp_dir.path().join("absent.toml")),
            Err(ConfigError::ReadError { .. })
        ));
    }
}
