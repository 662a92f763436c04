//! Configuration management command implementation.

use crate::cli::{ConfigAction, ConfigArgs, ui};
use crate::config::ConfigService;
use crate::{Result, error::SwapXError};

/// Execute a configuration subcommand against the given service.
pub async fn execute(args: ConfigArgs, config_service: &dyn ConfigService) -> Result<()> {
    match args.action {
        ConfigAction::Set { key, value } => {
            config_service.set_config_value(&key, &value)?;
            ui::print_success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Get { key } => {
            let value = config_service.get_config_value(&key)?;
            println!("{}", value);
        }
        ConfigAction::List => {
            let config = config_service.get_config()?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| SwapXError::config(format!("TOML serialization error: {}", e)))?;
            println!("{}", text);
        }
        ConfigAction::Reset => {
            config_service.reset_to_defaults()?;
            ui::print_success("Configuration reset to defaults.");
        }
        ConfigAction::Path => {
            let path = config_service.get_config_file_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
