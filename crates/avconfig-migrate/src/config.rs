//! Configuration types for avconfig-migrate.

use serde::{Deserialize, Serialize};

use crate::connectors::common::validate_url;
use crate::connectors::config_db::ConfigDbConfig;
use crate::connectors::json_snapshot::JsonSnapshotConfig;
use crate::error::{Error, Result};

/// Destination base URL.
pub const ENV_DB_ADDRESS: &str = "DB_ADDRESS";
/// Destination basic-auth username.
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";
/// Destination basic-auth password.
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
/// Legacy configuration-database microservice base URL.
pub const ENV_SOURCE_ADDRESS: &str = "CONFIGURATION_DATABASE_MICROSERVICE_ADDRESS";

/// Main migration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Legacy store configuration.
    pub source: SourceConfig,
    /// Destination document store configuration. May be left out for
    /// commands that only read; `validate` rejects it for a run.
    #[serde(default)]
    pub destination: DestinationConfig,
    /// Migration options.
    #[serde(default)]
    pub options: MigrationOptions,
}

/// Legacy store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourceConfig {
    /// The legacy configuration-database microservice.
    #[serde(rename = "config_db")]
    ConfigDb(ConfigDbConfig),
    /// A JSON export of the legacy store.
    #[serde(rename = "json_file")]
    JsonFile(JsonSnapshotConfig),
}

/// Destination document store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Base URL; documents land at `{address}/{collection}/{id}`.
    pub address: String,
    /// Optional basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Optional request timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl DestinationConfig {
    /// Basic-auth credentials, only when both parts are non-empty.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Migration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Dry run mode (log documents instead of writing them).
    #[serde(default)]
    pub dry_run: bool,
    /// Treat non-2xx destination responses as success (logged only).
    #[serde(default)]
    pub tolerate_http_errors: bool,
    /// Show a progress bar during the device stage.
    #[serde(default = "default_true")]
    pub progress: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            tolerate_http_errors: false,
            progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl SourceConfig {
    /// Build the source configuration from the process environment. Only
    /// the source address is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the source address is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the source configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the source address is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_SOURCE_ADDRESS)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::Config(format!("missing required env: {}", ENV_SOURCE_ADDRESS))
            })?;

        Ok(Self::ConfigDb(ConfigDbConfig {
            url,
            timeout_secs: None,
        }))
    }
}

impl MigrationConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Build configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `DB_ADDRESS` or the source address is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("missing required env: {}", key)))
        };

        let source = SourceConfig::from_lookup(&lookup)?;
        let address = required(ENV_DB_ADDRESS)?;

        Ok(Self {
            source,
            destination: DestinationConfig {
                address,
                username: lookup(ENV_DB_USERNAME),
                password: lookup(ENV_DB_PASSWORD),
                timeout_secs: None,
            },
            options: MigrationOptions::default(),
        })
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.destination.address.is_empty() {
            return Err(Error::Config(
                "destination address cannot be empty".to_string(),
            ));
        }
        validate_url(&self.destination.address)?;

        match &self.source {
            SourceConfig::ConfigDb(cfg) => validate_url(&cfg.url)?,
            SourceConfig::JsonFile(cfg) => {
                if cfg.path.as_os_str().is_empty() {
                    return Err(Error::Config("snapshot path cannot be empty".to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let options = MigrationOptions::default();
        assert!(!options.dry_run);
        assert!(!options.tolerate_http_errors);
        assert!(options.progress);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = MigrationConfig::from_lookup(lookup_from(&[
            (ENV_SOURCE_ADDRESS, "http://configdb:8006"),
            (ENV_DB_ADDRESS, "http://couch:5984"),
            (ENV_DB_USERNAME, "admin"),
            (ENV_DB_PASSWORD, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.destination.address, "http://couch:5984");
        assert_eq!(config.destination.credentials(), Some(("admin", "secret")));
        assert!(matches!(config.source, SourceConfig::ConfigDb(ref c) if c.url == "http://configdb:8006"));
    }

    #[test]
    fn test_config_from_lookup_missing_address() {
        let result =
            MigrationConfig::from_lookup(lookup_from(&[(ENV_SOURCE_ADDRESS, "http://configdb")]));
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains(ENV_DB_ADDRESS)));
    }

    #[test]
    fn test_source_from_lookup_needs_no_destination() {
        let lookup = lookup_from(&[(ENV_SOURCE_ADDRESS, "http://configdb:8006")]);

        let source = SourceConfig::from_lookup(&lookup).unwrap();
        assert!(matches!(source, SourceConfig::ConfigDb(ref c) if c.url == "http://configdb:8006"));
        assert!(MigrationConfig::from_lookup(&lookup).is_err());
    }

    #[test]
    fn test_source_from_lookup_missing_address() {
        let result = SourceConfig::from_lookup(lookup_from(&[(ENV_DB_ADDRESS, "http://couch:5984")]));
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains(ENV_SOURCE_ADDRESS)));
    }

    #[test]
    fn test_credentials_require_both_parts() {
        let mut dest = DestinationConfig {
            address: "http://couch:5984".to_string(),
            username: Some("admin".to_string()),
            password: None,
            timeout_secs: None,
        };
        assert_eq!(dest.credentials(), None);

        dest.password = Some(String::new());
        assert_eq!(dest.credentials(), None);

        dest.password = Some("secret".to_string());
        assert_eq!(dest.credentials(), Some(("admin", "secret")));
    }

    #[test]
    fn test_config_validate_destination() {
        let config = MigrationConfig {
            source: SourceConfig::JsonFile(JsonSnapshotConfig {
                path: PathBuf::from("legacy.json"),
            }),
            destination: DestinationConfig::default(),
            options: MigrationOptions::default(),
        };
        assert!(config.validate().is_err());

        let config = MigrationConfig {
            destination: DestinationConfig {
                address: "couch:5984".to_string(),
                ..Default::default()
            },
            ..config
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r#"
source:
  type: config_db
  url: http://configdb:8006
destination:
  address: http://couch:5984
  username: admin
  password: secret
options:
  tolerate_http_errors: true
"#;
        let config: MigrationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.options.tolerate_http_errors);
        assert!(config.options.progress);
        assert_eq!(config.destination.timeout_secs, None);
    }

    #[test]
    fn test_config_yaml_source_only() {
        let yaml = r#"
source:
  type: config_db
  url: http://configdb:8006
"#;
        let config: MigrationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.source, SourceConfig::ConfigDb(_)));
        assert!(config.destination.address.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_yaml_parse_json_file_source() {
        let yaml = r#"
source:
  type: json_file
  path: ./legacy.json
destination:
  address: http://couch:5984
"#;
        let config: MigrationConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.source, SourceConfig::JsonFile(_)));
        assert_eq!(config.destination.credentials(), None);
    }
}
