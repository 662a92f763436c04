//! Key-path access and validation for configuration values.
//!
//! Every key the service recognizes is listed here; an unknown key is a
//! configuration error, never a silent pass-through.

use crate::config::Config;
use crate::{Result, error::SwapXError};

/// All dot-separated keys accepted by `get_field`/`set_field`.
pub const KNOWN_KEYS: &[&str] = &[
    "general.max_concurrency",
    "general.progress_interval_items",
    "general.confirm_before_run",
    "engine.case_sensitive",
    "engine.whole_word",
    "engine.stream_size_threshold_bytes",
    "engine.oversize_limit_bytes",
    "engine.stop_on_error",
    "engine.max_errors",
    "engine.per_file_timeout_ms",
    "target.extensions",
    "target.exclude_patterns",
];

/// Read one configuration value as a display string.
pub fn get_field(config: &Config, key: &str) -> Result<String> {
    let value = match key {
        "general.max_concurrency" => config.general.max_concurrency.to_string(),
        "general.progress_interval_items" => config.general.progress_interval_items.to_string(),
        "general.confirm_before_run" => config.general.confirm_before_run.to_string(),
        "engine.case_sensitive" => config.engine.case_sensitive.to_string(),
        "engine.whole_word" => config.engine.whole_word.to_string(),
        "engine.stream_size_threshold_bytes" => {
            config.engine.stream_size_threshold_bytes.to_string()
        }
        "engine.oversize_limit_bytes" => config.engine.oversize_limit_bytes.to_string(),
        "engine.stop_on_error" => config.engine.stop_on_error.to_string(),
        "engine.max_errors" => config.engine.max_errors.to_string(),
        "engine.per_file_timeout_ms" => config.engine.per_file_timeout_ms.to_string(),
        "target.extensions" => config.target.extensions.join(","),
        "target.exclude_patterns" => config.target.exclude_patterns.join(","),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

/// Set one configuration value from its string form.
pub fn set_field(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "general.max_concurrency" => {
            config.general.max_concurrency = parse_nonzero_usize(key, value)?;
        }
        "general.progress_interval_items" => {
            config.general.progress_interval_items = parse_nonzero_usize(key, value)?;
        }
        "general.confirm_before_run" => config.general.confirm_before_run = parse_bool(key, value)?,
        "engine.case_sensitive" => config.engine.case_sensitive = parse_bool(key, value)?,
        "engine.whole_word" => config.engine.whole_word = parse_bool(key, value)?,
        "engine.stream_size_threshold_bytes" => {
            config.engine.stream_size_threshold_bytes = parse_u64(key, value)?;
        }
        "engine.oversize_limit_bytes" => {
            config.engine.oversize_limit_bytes = parse_u64(key, value)?;
        }
        "engine.stop_on_error" => config.engine.stop_on_error = parse_bool(key, value)?,
        "engine.max_errors" => {
            config.engine.max_errors = value
                .parse()
                .map_err(|_| invalid_value(key, value, "a non-negative integer"))?;
        }
        "engine.per_file_timeout_ms" => config.engine.per_file_timeout_ms = parse_u64(key, value)?,
        "target.extensions" => config.target.extensions = parse_list(value),
        "target.exclude_patterns" => config.target.exclude_patterns = parse_list(value),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Validate cross-field constraints of a full configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.general.max_concurrency == 0 {
        return Err(SwapXError::config(
            "general.max_concurrency must be greater than 0",
        ));
    }
    if config.general.progress_interval_items == 0 {
        return Err(SwapXError::config(
            "general.progress_interval_items must be greater than 0",
        ));
    }
    if config.engine.stream_size_threshold_bytes > config.engine.oversize_limit_bytes {
        return Err(SwapXError::config(
            "engine.stream_size_threshold_bytes must not exceed engine.oversize_limit_bytes",
        ));
    }
    Ok(())
}

fn unknown_key(key: &str) -> SwapXError {
    SwapXError::config(format!(
        "Unknown configuration key '{}'. Known keys: {}",
        key,
        KNOWN_KEYS.join(", ")
    ))
}

fn invalid_value(key: &str, value: &str, expected: &str) -> SwapXError {
    SwapXError::config(format!(
        "Invalid value '{}' for {}: expected {}",
        value, key, expected
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_value(key, value, "true or false")),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| invalid_value(key, value, "a non-negative integer"))
}

fn parse_nonzero_usize(key: &str, value: &str) -> Result<usize> {
    let parsed: usize = value
        .parse()
        .map_err(|_| invalid_value(key, value, "a positive integer"))?;
    if parsed == 0 {
        return Err(invalid_value(key, value, "a positive integer"));
    }
    Ok(parsed)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
