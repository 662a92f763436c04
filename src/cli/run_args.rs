// src/cli/run_args.rs
use clap::Args;
use std::path::PathBuf;

use crate::cli::selection::{RuleArgs, TargetArgs};

/// Arguments for the batch replacement run.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Root directory to process
    pub root: PathBuf,

    #[command(flatten)]
    pub rules: RuleArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Execute the pipeline without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Parallel file limit (overrides configuration)
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Cancel the batch on the first per-file failure
    #[arg(long)]
    pub stop_on_error: bool,

    /// Cancel the batch when failures exceed N (overrides configuration)
    #[arg(long, value_name = "N")]
    pub max_errors: Option<usize>,

    /// Per-file time limit in milliseconds, 0 disables (overrides configuration)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}
