// src/cli/config_args.rs
use clap::{Args, Subcommand};

/// Configuration management arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Set a configuration value
    Set {
        /// Dot-separated key (e.g. engine.case_sensitive)
        key: String,
        /// New value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Dot-separated key
        key: String,
    },
    /// List the effective configuration
    List,
    /// Reset configuration to defaults
    Reset,
    /// Print the configuration file path
    Path,
}
