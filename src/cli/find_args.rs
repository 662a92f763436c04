// src/cli/find_args.rs
use clap::Args;
use std::path::PathBuf;

use crate::cli::selection::TargetArgs;

/// Arguments for target discovery without processing.
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Root directory to scan
    pub root: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Also print file sizes
    #[arg(short = 'l', long)]
    pub long: bool,
}
