//! Configuration service system for dependency injection and test isolation.
//!
//! This module provides a clean abstraction for configuration management
//! that enables dependency injection and complete test isolation without
//! requiring global state resets.

use config::{Config as ConfigCrate, ConfigBuilder, Environment, File, builder::DefaultState};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::{Config, validator};
use crate::{Result, error::SwapXError};

/// Configuration service trait for dependency injection.
///
/// This trait abstracts configuration loading and reloading operations,
/// allowing different implementations for production and testing
/// environments.
pub trait ConfigService: Send + Sync {
    /// Get the current configuration.
    ///
    /// Returns the current [`Config`] instance loaded from files,
    /// environment variables, and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails due to invalid
    /// TOML, invalid values, or file system access issues.
    fn get_config(&self) -> Result<Config>;

    /// Reload configuration from sources, discarding any cached values.
    fn reload(&self) -> Result<()>;

    /// Save the current configuration to the default file location.
    fn save_config(&self) -> Result<()>;

    /// Save the current configuration to a specific file path.
    fn save_config_to_file(&self, path: &Path) -> Result<()>;

    /// Get the configuration file path this service reads from.
    fn get_config_file_path(&self) -> Result<PathBuf>;

    /// Get a specific configuration value by dot-separated key path
    /// (for example `engine.case_sensitive`).
    fn get_config_value(&self, key: &str) -> Result<String>;

    /// Set a specific configuration value by dot-separated key path and
    /// persist the result.
    fn set_config_value(&self, key: &str, value: &str) -> Result<()>;

    /// Overwrite the configuration file with defaults and reload.
    fn reset_to_defaults(&self) -> Result<()>;
}

/// Production configuration service implementation.
///
/// Loads configuration from three layers, later layers winning:
/// built-in defaults, the user configuration file, and `SWAPX_*`
/// environment variables. The result is cached until [`ConfigService::reload`].
pub struct ProductionConfigService {
    config_builder: ConfigBuilder<DefaultState>,
    config_file_path: PathBuf,
    cached_config: Arc<RwLock<Option<Config>>>,
}

impl ProductionConfigService {
    /// Create a new production configuration service.
    ///
    /// Honors `SWAPX_CONFIG_PATH` as an override for the configuration
    /// file location.
    pub fn new() -> Result<Self> {
        let config_file_path = match std::env::var("SWAPX_CONFIG_PATH") {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => Self::user_config_path(),
        };
        Self::with_config_file(config_file_path)
    }

    /// Create a service reading from an explicit configuration file.
    ///
    /// Defaults form the base layer, so a sparse file or environment
    /// cannot reset unrelated sections.
    pub fn with_config_file(config_file_path: PathBuf) -> Result<Self> {
        let defaults = ConfigCrate::try_from(&Config::default())
            .map_err(|e| SwapXError::config(format!("Failed to encode defaults: {}", e)))?;
        let config_builder = ConfigCrate::builder()
            .add_source(defaults)
            .add_source(File::from(config_file_path.clone()).required(false))
            .add_source(
                Environment::with_prefix("SWAPX")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(Self {
            config_builder,
            config_file_path,
            cached_config: Arc::new(RwLock::new(None)),
        })
    }

    /// The default user configuration file path
    /// (`$CONFIG_DIR/swapx/config.toml`).
    fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("swapx")
            .join("config.toml")
    }

    /// Load and validate configuration from all sources.
    fn load_and_validate(&self) -> Result<Config> {
        debug!(
            "loading configuration (file: {})",
            self.config_file_path.display()
        );
        let config_crate = self
            .config_builder
            .build_cloned()
            .map_err(|e| SwapXError::config(format!("Failed to build configuration: {}", e)))?;

        let mut app_config: Config = config_crate.try_deserialize()?;
        app_config.loaded_from = self
            .config_file_path
            .exists()
            .then(|| self.config_file_path.clone());

        validator::validate_config(&app_config)?;
        Ok(app_config)
    }
}

impl ConfigService for ProductionConfigService {
    fn get_config(&self) -> Result<Config> {
        {
            let cached = self.cached_config.read().unwrap();
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }
        let config = self.load_and_validate()?;
        *self.cached_config.write().unwrap() = Some(config.clone());
        Ok(config)
    }

    fn reload(&self) -> Result<()> {
        *self.cached_config.write().unwrap() = None;
        self.get_config().map(|_| ())
    }

    fn save_config(&self) -> Result<()> {
        let path = self.get_config_file_path()?;
        self.save_config_to_file(&path)
    }

    fn save_config_to_file(&self, path: &Path) -> Result<()> {
        let config = self.get_config()?;
        let text = toml::to_string_pretty(&config)
            .map_err(|e| SwapXError::config(format!("TOML serialization error: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| SwapXError::write_failure(parent, source))?;
        }
        std::fs::write(path, text).map_err(|source| SwapXError::write_failure(path, source))
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.config_file_path.clone())
    }

    fn get_config_value(&self, key: &str) -> Result<String> {
        let config = self.get_config()?;
        validator::get_field(&config, key)
    }

    fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.get_config()?;
        validator::set_field(&mut config, key, value)?;
        validator::validate_config(&config)?;
        *self.cached_config.write().unwrap() = Some(config);
        self.save_config()
    }

    fn reset_to_defaults(&self) -> Result<()> {
        *self.cached_config.write().unwrap() = Some(Config::default());
        self.save_config()?;
        self.reload()
    }
}

/// Test configuration service with a fixed in-memory configuration.
///
/// Never touches the file system; `save_config` and `reload` are no-ops.
pub struct TestConfigService {
    config: RwLock<Config>,
}

impl TestConfigService {
    /// Create a service around an explicit configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Create a service with default configuration values.
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }
}

impl ConfigService for TestConfigService {
    fn get_config(&self) -> Result<Config> {
        Ok(self.config.read().unwrap().clone())
    }

    fn reload(&self) -> Result<()> {
        Ok(())
    }

    fn save_config(&self) -> Result<()> {
        Ok(())
    }

    fn save_config_to_file(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("test-config.toml"))
    }

    fn get_config_value(&self, key: &str) -> Result<String> {
        let config = self.config.read().unwrap();
        validator::get_field(&config, key)
    }

    fn set_config_value(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.config.write().unwrap();
        validator::set_field(&mut config, key, value)?;
        validator::validate_config(&config)
    }

    fn reset_to_defaults(&self) -> Result<()> {
        *self.config.write().unwrap() = Config::default();
        Ok(())
    }
}
