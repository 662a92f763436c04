//! Target discovery command implementation.
//!
//! Runs the file walker with the effective filters and prints the result,
//! without reading any file content.

use crate::cli::{FindArgs, ui};
use crate::config::ConfigService;
use crate::core::discovery::FileWalker;
use crate::Result;

/// Execute discovery and list the target files.
pub async fn execute(args: FindArgs, config_service: &dyn ConfigService) -> Result<()> {
    let app_config = config_service.get_config()?;
    let walker_options = args.target.resolve_walker_options(None, &app_config);
    let files = FileWalker::new(walker_options).walk(&args.root)?;

    for descriptor in &files {
        if args.long {
            println!("{:>12}  {}", descriptor.size, descriptor.path.display());
        } else {
            println!("{}", descriptor.path.display());
        }
    }
    ui::print_success(&format!("{} matched.", ui::count_label(files.len(), "file")));
    Ok(())
}
