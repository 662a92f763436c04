//! Command-line interface for the SwapX bulk replacement tool.
//!
//! This module provides the top-level CLI application structure and
//! subcommands for batch replacement runs, read-only previews, target
//! discovery, configuration management, and shell completion generation.
//!
//! # Architecture
//!
//! The CLI is built using `clap` and follows a subcommand pattern:
//! - `run` - Execute the replacement pipeline over a directory tree
//! - `preview` - Dry-run analysis with impact statistics and risk score
//! - `find` - List the files a run would target
//! - `config` - Configuration management and inspection
//! - `generate-completion` - Shell completion script generation
//!
//! # Examples
//!
//! ```bash
//! # Replace across all JavaScript sources, with confirmation
//! swapx run ./src --rule "getUserData=fetchUserProfile" -e js
//!
//! # Load a rule document and preview its impact
//! swapx preview ./project --config rules.json
//!
//! # Which files would a run touch?
//! swapx find ./project -e js,ts -x "node_modules/**"
//! ```

mod config_args;
mod find_args;
mod generate_completion_args;
mod preview_args;
mod run_args;
pub mod selection;
pub mod table;
pub mod ui;

use clap::{Parser, Subcommand};
pub use config_args::{ConfigAction, ConfigArgs};
pub use find_args::FindArgs;
pub use generate_completion_args::GenerateCompletionArgs;
pub use preview_args::PreviewArgs;
pub use run_args::RunArgs;
pub use selection::{RuleArgs, TargetArgs};
pub use ui::{count_label, create_progress_bar, print_error, print_success, print_warning};

/// Main CLI application structure defining the top-level interface.
#[derive(Parser, Debug)]
#[command(name = "swapx")]
#[command(about = "Bulk literal search-and-replace across a directory tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the SwapX CLI application.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a batch replacement over a directory tree
    Run(RunArgs),

    /// Analyze the impact of a rule set without writing anything
    Preview(PreviewArgs),

    /// List the files a run would target
    Find(FindArgs),

    /// Manage and inspect application configuration
    Config(ConfigArgs),

    /// Generate shell completion scripts
    GenerateCompletion(GenerateCompletionArgs),
}

/// Executes the SwapX CLI application with parsed arguments.
///
/// This is the main entry point for CLI execution, routing parsed
/// command-line arguments to their respective command handlers. Errors
/// are propagated up to `main` for proper exit code handling.
pub async fn run() -> crate::Result<()> {
    let config_service = std::sync::Arc::new(crate::config::ProductionConfigService::new()?);
    run_with_config(config_service.as_ref()).await
}

/// Run the CLI with a provided configuration service.
///
/// This function enables dependency injection of configuration services,
/// making it easier to test and providing better control over
/// configuration management.
pub async fn run_with_config(
    config_service: &dyn crate::config::ConfigService,
) -> crate::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            crate::commands::run_command::execute(args, config_service).await?;
        }
        Commands::Preview(args) => {
            crate::commands::preview_command::execute(args, config_service).await?;
        }
        Commands::Find(args) => {
            crate::commands::find_command::execute(args, config_service).await?;
        }
        Commands::Config(args) => {
            crate::commands::config_command::execute(args, config_service).await?;
        }
        Commands::GenerateCompletion(args) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            let cmd_name = cmd.get_name().to_string();
            let mut stdout = std::io::stdout();
            clap_complete::generate(args.shell, &mut cmd, cmd_name, &mut stdout);
        }
    }
    Ok(())
}
