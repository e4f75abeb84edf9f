//! Configuration management
//!
//! This module handles loading the optional s3upload configuration file.
//! The file is stored in TOML format at ~/.config/s3upload/config.toml,
//! or under `$S3UPLOAD_CONFIG_DIR` when that variable is set.
//!
//! Credentials are never read from this file.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3UPLOAD_CONFIG_DIR";

/// Region used when neither flag, environment nor config names one
pub const DEFAULT_REGION: &str = "us-east-1";

const DEFAULT_OUTPUT: &str = "human";

const DEFAULT_COLOR: &str = "auto";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings for uploads and output
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// AWS region
    #[serde(default)]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub path_style: bool,

    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            path_style: false,
            output: default_output(),
            color: default_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

impl Defaults {
    /// Whether JSON output is the configured default
    pub fn json_output(&self) -> bool {
        self.output == "json"
    }

    /// Whether colors are disabled by configuration
    pub fn color_disabled(&self) -> bool {
        self.color == "never"
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.output.as_str(), "human" | "json") {
            return Err(Error::Config(format!(
                "Unknown output format '{}'. Expected 'human' or 'json'",
                self.output
            )));
        }
        if !matches!(self.color.as_str(), "auto" | "always" | "never") {
            return Err(Error::Config(format!(
                "Unknown color mode '{}'. Expected 'auto', 'always' or 'never'",
                self.color
            )));
        }
        if let Some(endpoint) = &self.endpoint_url {
            url::Url::parse(endpoint)?;
        }
        Ok(())
    }
}

/// Configuration manager handles loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3upload"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        tracing::debug!("Loading configuration from {}", self.config_path.display());
        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3upload.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        config.defaults.validate()?;
        Ok(config)
    }
}

/// Storage client settings after merging flags, environment and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// AWS region
    pub region: String,

    /// Custom endpoint for S3-compatible services
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    pub force_path_style: bool,
}

impl ClientOptions {
    /// Merge command-line values over the configured defaults.
    ///
    /// `region` already carries the environment fallback from the CLI layer.
    pub fn resolve(
        region: Option<&str>,
        endpoint_url: Option<&str>,
        path_style: bool,
        defaults: &Defaults,
    ) -> Result<Self> {
        let region = region
            .or(defaults.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        let endpoint_url = endpoint_url
            .or(defaults.endpoint_url.as_deref())
            .map(|endpoint| url::Url::parse(endpoint).map(|_| endpoint.to_string()))
            .transpose()?;

        Ok(Self {
            region,
            endpoint_url,
            force_path_style: path_style || defaults.path_style,
        })
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.color, "auto");
        assert!(config.defaults.region.is_none());
        assert!(!config.defaults.path_style);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_load_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [defaults]
            region = "eu-west-1"
            endpoint_url = "http://localhost:9000"
            path_style = true
            output = "json"
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.defaults.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            config.defaults.endpoint_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.defaults.path_style);
        assert!(config.defaults.json_output());
        assert!(!config.defaults.color_disabled());
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_invalid_output_rejected() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 1\n[defaults]\noutput = \"yaml\"\n",
        )
        .unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [").unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_client_options_flag_overrides_config() {
        let defaults = Defaults {
            region: Some("eu-west-1".into()),
            endpoint_url: Some("http://config:9000".into()),
            ..Default::default()
        };

        let options = ClientOptions::resolve(
            Some("ap-south-1"),
            Some("http://flag:9000"),
            false,
            &defaults,
        )
        .unwrap();
        assert_eq!(options.region, "ap-south-1");
        assert_eq!(options.endpoint_url.as_deref(), Some("http://flag:9000"));
        assert!(!options.force_path_style);
    }

    #[test]
    fn test_client_options_fall_back_to_config_then_default() {
        let defaults = Defaults {
            endpoint_url: Some("http://config:9000".into()),
            path_style: true,
            ..Default::default()
        };

        let options = ClientOptions::resolve(None, None, false, &defaults).unwrap();
        assert_eq!(options.region, DEFAULT_REGION);
        assert_eq!(options.endpoint_url.as_deref(), Some("http://config:9000"));
        assert!(options.force_path_style);
    }

    #[test]
    fn test_client_options_reject_bad_endpoint() {
        let err = ClientOptions::resolve(None, Some("not a url"), false, &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
