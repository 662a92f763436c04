// src/cli/generate_completion_args.rs
use clap::Args;
use clap_complete::Shell;

/// Shell completion script generation arguments.
#[derive(Args, Debug)]
pub struct GenerateCompletionArgs {
    /// Shell to generate the completion script for
    #[arg(value_enum)]
    pub shell: Shell,
}
