// src/cli/preview_args.rs
use clap::Args;
use std::path::PathBuf;

use crate::cli::selection::{RuleArgs, TargetArgs};

/// Arguments for the read-only preview.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Root directory to analyze
    pub root: PathBuf,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Maximum files analyzed for the sample
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub files: usize,

    /// Maximum change samples shown per file
    #[arg(long, default_value_t = 5, value_name = "N")]
    pub samples: usize,

    /// Context lines around each sample
    #[arg(long, default_value_t = 2, value_name = "N")]
    pub context: usize,
}
