//! Shared argument groups for rule sourcing and target selection.
//!
//! The `run`, `preview`, and `find` subcommands all accept the same way
//! of describing what to match (a rule document, inline rules, matcher
//! flags) and where to look (extensions, exclude globs). These groups are
//! flattened into each subcommand's argument struct.

use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::core::discovery::WalkerOptions;
use crate::core::rules::document::ReplacementDocument;
use crate::core::rules::RuleSpec;
use crate::{Result, error::SwapXError};

/// Where the rules come from and how they match by default.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Rule document to load (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Inline rule as FROM=TO; repeatable, applied after document rules
    #[arg(short, long = "rule", value_name = "FROM=TO")]
    pub rule: Vec<String>,

    /// Match case-insensitively by default
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Match whole words only by default
    #[arg(short = 'w', long)]
    pub whole_word: bool,
}

/// Which files the walk should yield.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Extensions to include, comma-separated or repeated; empty means all
    #[arg(short, long, value_delimiter = ',', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Glob pattern to exclude, relative to the root; repeatable
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl RuleArgs {
    /// Assemble the raw rule list: document rules first, inline rules
    /// appended in flag order.
    ///
    /// Also returns the document's target settings when a document was
    /// loaded, so its extension/exclude defaults can participate in
    /// target resolution.
    pub fn collect_specs(
        &self,
    ) -> Result<(
        Vec<RuleSpec>,
        Option<crate::core::rules::document::TargetSettings>,
    )> {
        let mut specs = Vec::new();
        let mut target_settings = None;
        if let Some(path) = &self.config {
            let document = ReplacementDocument::load(path)?;
            specs.extend(document.replacements);
            target_settings = Some(document.target_settings);
        }
        for pair in &self.rule {
            specs.push(RuleSpec::parse_cli_pair(pair)?);
        }
        if specs.is_empty() {
            return Err(SwapXError::EmptyRuleSet);
        }
        Ok((specs, target_settings))
    }
}

impl TargetArgs {
    /// Resolve the effective walker options.
    ///
    /// Precedence per field: command flags, then the rule document's
    /// target settings, then the application configuration.
    pub fn resolve_walker_options(
        &self,
        document_settings: Option<&crate::core::rules::document::TargetSettings>,
        app_config: &Config,
    ) -> WalkerOptions {
        let include_extensions = if !self.extensions.is_empty() {
            self.extensions.clone()
        } else if let Some(settings) = document_settings {
            if settings.extensions.is_empty() {
                app_config.target.extensions.clone()
            } else {
                settings.extensions.clone()
            }
        } else {
            app_config.target.extensions.clone()
        };

        let exclude_patterns = if !self.exclude.is_empty() {
            self.exclude.clone()
        } else if let Some(settings) = document_settings {
            if settings.exclude_patterns.is_empty() {
                app_config.target.exclude_patterns.clone()
            } else {
                settings.exclude_patterns.clone()
            }
        } else {
            app_config.target.exclude_patterns.clone()
        };

        WalkerOptions {
            include_extensions,
            exclude_patterns,
            stream_size_threshold_bytes: app_config.engine.stream_size_threshold_bytes,
        }
    }
}
