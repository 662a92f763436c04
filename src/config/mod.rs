//! Configuration management module for SwapX.
//!
//! This module provides the configuration service system with dependency
//! injection support and the type definitions for every tunable the
//! engine recognizes.
//!
//! # Key Components
//!
//! - [`Config`] - Main configuration structure containing all settings
//! - [`ConfigService`] - Service interface for configuration management
//! - [`ProductionConfigService`] - Production implementation with file I/O
//!   and `SWAPX_*` environment overrides
//! - [`TestConfigService`] - Test implementation with controlled behavior
//!
//! # Layering
//!
//! Production configuration resolves in three layers, later layers
//! winning: built-in defaults → the TOML file under the user config
//! directory (`swapx/config.toml`) → environment variables with the
//! `SWAPX` prefix and `__` as the section separator (for example
//! `SWAPX_GENERAL__MAX_CONCURRENCY=4`).
//!
//! # Examples
//!
//! ```rust
//! use swapx_cli::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.general.max_concurrency, 10);
//! assert!(config.engine.case_sensitive);
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod service;
pub mod validator;

pub use service::{ConfigService, ProductionConfigService, TestConfigService};

use crate::core::batch::BatchOptions;
use crate::core::discovery::WalkerOptions;

/// Full application configuration for SwapX.
///
/// Aggregates the general runtime options, the engine defaults handed to
/// the batch executor, and the default target selection.
///
/// # Serialization
///
/// This struct round-trips through TOML for the configuration file.
///
/// ```rust
/// use swapx_cli::config::Config;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let toml_str = toml::to_string(&config)?;
/// assert!(toml_str.contains("[engine]"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// General runtime options.
    pub general: GeneralConfig,
    /// Engine defaults for batch execution.
    pub engine: EngineConfig,
    /// Default target selection (extensions, excludes).
    pub target: TargetConfig,
    /// Optional file path from which the configuration was loaded.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Config {
    /// Derive batch options from this configuration. `dry_run` stays
    /// false; command flags flip it.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            case_sensitive: self.engine.case_sensitive,
            whole_word: self.engine.whole_word,
            dry_run: false,
            max_concurrency: self.general.max_concurrency,
            stream_size_threshold_bytes: self.engine.stream_size_threshold_bytes,
            oversize_limit_bytes: self.engine.oversize_limit_bytes,
            stop_on_error: self.engine.stop_on_error,
            max_errors: self.engine.max_errors,
            per_file_timeout_ms: self.engine.per_file_timeout_ms,
            progress_interval_items: self.general.progress_interval_items,
        }
    }

    /// Derive walker options from this configuration.
    pub fn walker_options(&self) -> WalkerOptions {
        WalkerOptions {
            include_extensions: self.target.extensions.clone(),
            exclude_patterns: self.target.exclude_patterns.clone(),
            stream_size_threshold_bytes: self.engine.stream_size_threshold_bytes,
        }
    }
}

/// General runtime options.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    /// Maximum number of files processed in parallel.
    pub max_concurrency: usize,
    /// Emit a progress event every N completed files.
    pub progress_interval_items: usize,
    /// Ask for confirmation before a writing run.
    pub confirm_before_run: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            progress_interval_items: 1,
            confirm_before_run: true,
        }
    }
}

/// Engine defaults handed to the batch executor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EngineConfig {
    /// Default case sensitivity for rules that do not set it.
    pub case_sensitive: bool,
    /// Default whole-word matching for rules that do not set it.
    pub whole_word: bool,
    /// Size at or above which streaming I/O is used.
    pub stream_size_threshold_bytes: u64,
    /// Hard cap above which files are skipped unread.
    pub oversize_limit_bytes: u64,
    /// Cancel the batch on the first per-file failure.
    pub stop_on_error: bool,
    /// Cancel the batch when failures exceed this count.
    pub max_errors: usize,
    /// Per-file pipeline time limit in milliseconds (0 disables).
    pub per_file_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            stream_size_threshold_bytes: BatchOptions::DEFAULT_STREAM_SIZE_THRESHOLD,
            oversize_limit_bytes: BatchOptions::DEFAULT_OVERSIZE_LIMIT,
            stop_on_error: false,
            max_errors: 50,
            per_file_timeout_ms: 30_000,
        }
    }
}

/// Default target selection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TargetConfig {
    /// Extensions to include; empty means all files.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Glob patterns excluded from discovery.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            exclude_patterns: vec![
                "node_modules/**".to_string(),
                ".git/**".to_string(),
                "dist/**".to_string(),
                "build/**".to_string(),
            ],
        }
    }
}
