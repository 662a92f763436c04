//! Comprehensive error types for the SwapX CLI application operations.
//!
//! This module defines the `SwapXError` enum covering all error conditions
//! that can occur during rule validation, file discovery, batch execution,
//! and general command execution.
//!
//! It also provides helper methods to construct errors and generate
//! user-friendly messages.
//!
//! Per-file *skip* conditions (likely-binary content, oversize files,
//! cancellation) are deliberately not errors; they are reported as
//! [`crate::core::batch::FileOutcome::Skipped`] on the file's result.
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors in the SwapX application.
///
/// Each variant provides specific context to facilitate debugging and
/// user-friendly reporting.
///
/// # Examples
///
/// ```rust
/// use swapx_cli::error::{SwapXError, SwapXResult};
///
/// fn example() -> SwapXResult<()> {
///     Err(SwapXError::InvalidRule {
///         index: 0,
///         reason: "'from' must not be empty".to_string(),
///     })
/// }
/// ```
///
/// # Exit Codes
///
/// Each error variant maps to an exit code via `SwapXError::exit_code`.
#[derive(Error, Debug)]
pub enum SwapXError {
    /// I/O operation failed during file system access.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error due to invalid or missing settings.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// A rule in the replacement list failed validation.
    ///
    /// Carries the zero-based position of the offending rule so callers
    /// can point at the exact list entry.
    #[error("Invalid rule at index {index}: {reason}")]
    InvalidRule {
        /// Zero-based position of the rule in the submitted list
        index: usize,
        /// What made the rule invalid
        reason: String,
    },

    /// The submitted replacement list contains no rules.
    #[error("Rule set is empty: at least one replacement rule is required")]
    EmptyRuleSet,

    /// The specified path does not exist on the filesystem.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Access to the specified path was denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Reading a file's content failed.
    #[error("Unable to read file: {path}")]
    ReadError {
        /// The file that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing a file's content failed.
    #[error("Unable to write file: {path}")]
    WriteError {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Per-file processing exceeded the configured time limit.
    #[error("Processing timed out after {limit_ms} ms: {path}")]
    Timeout {
        /// The file whose pipeline timed out
        path: PathBuf,
        /// The configured limit in milliseconds
        limit_ms: u64,
    },

    /// A batch control operation targeted an executor that is already running.
    #[error("A batch is already running on this executor")]
    AlreadyRunning,

    /// Error during file discovery (directory traversal).
    #[error("File discovery error: {message}")]
    FileDiscovery {
        /// Description of the discovery error
        message: String,
    },

    /// Generic command execution error.
    #[error("{0}")]
    CommandExecution(String),

    /// Catch-all error variant wrapping any other failure.
    #[error("Unknown error: {0}")]
    Other(#[from] anyhow::Error),
}

// Convert directory traversal errors to discovery errors
impl From<walkdir::Error> for SwapXError {
    fn from(err: walkdir::Error) -> Self {
        SwapXError::FileDiscovery {
            message: err.to_string(),
        }
    }
}

// Convert config crate error to configuration error
impl From<config::ConfigError> for SwapXError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(path) => SwapXError::Config {
                message: format!("Configuration file not found: {}", path),
            },
            config::ConfigError::Message(msg) => SwapXError::Config { message: msg },
            _ => SwapXError::Config {
                message: format!("Configuration error: {}", err),
            },
        }
    }
}

impl From<serde_json::Error> for SwapXError {
    fn from(err: serde_json::Error) -> Self {
        SwapXError::Config {
            message: format!("JSON serialization/deserialization error: {}", err),
        }
    }
}

impl From<toml::de::Error> for SwapXError {
    fn from(err: toml::de::Error) -> Self {
        SwapXError::Config {
            message: format!("TOML deserialization error: {}", err),
        }
    }
}

impl From<globset::Error> for SwapXError {
    fn from(err: globset::Error) -> Self {
        SwapXError::Config {
            message: format!("Invalid exclude pattern: {}", err),
        }
    }
}

/// Specialized `Result` type for SwapX operations.
pub type SwapXResult<T> = Result<T, SwapXError>;

impl SwapXError {
    /// Create a configuration error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use swapx_cli::error::SwapXError;
    /// let err = SwapXError::config("invalid setting");
    /// assert_eq!(err.to_string(), "Configuration error: invalid setting");
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        SwapXError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-rule error for the rule at `index`.
    pub fn rule<S: Into<String>>(index: usize, reason: S) -> Self {
        SwapXError::InvalidRule {
            index,
            reason: reason.into(),
        }
    }

    /// Create a file discovery error with the given message.
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        SwapXError::FileDiscovery {
            message: message.into(),
        }
    }

    /// Classify an I/O error that occurred while reading `path`.
    ///
    /// Not-found and permission failures get their own variants so the
    /// batch report can carry machine-readable kinds.
    pub fn read_failure(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => SwapXError::PathNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                SwapXError::PermissionDenied(path.to_path_buf())
            }
            _ => SwapXError::ReadError {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Classify an I/O error that occurred while writing `path`.
    pub fn write_failure(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => {
                SwapXError::PermissionDenied(path.to_path_buf())
            }
            _ => SwapXError::WriteError {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Return the corresponding exit code for this error variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use swapx_cli::error::SwapXError;
    /// assert_eq!(SwapXError::config("x").exit_code(), 2);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            SwapXError::Io(_) => 1,
            SwapXError::Config { .. } => 2,
            SwapXError::InvalidRule { .. } | SwapXError::EmptyRuleSet => 3,
            SwapXError::PathNotFound(_)
            | SwapXError::PermissionDenied(_)
            | SwapXError::ReadError { .. }
            | SwapXError::WriteError { .. } => 4,
            SwapXError::FileDiscovery { .. } => 5,
            SwapXError::Timeout { .. } => 6,
            SwapXError::AlreadyRunning => 7,
            _ => 1,
        }
    }

    /// Return a user-friendly error message with suggested remedies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use swapx_cli::error::SwapXError;
    /// let msg = SwapXError::config("missing key").user_friendly_message();
    /// assert!(msg.contains("Configuration error:"));
    /// ```
    pub fn user_friendly_message(&self) -> String {
        match self {
            SwapXError::Io(e) => format!("File operation error: {}", e),
            SwapXError::Config { message } => format!(
                "Configuration error: {}\nHint: run 'swapx config --help' for details",
                message
            ),
            SwapXError::InvalidRule { index, reason } => format!(
                "Invalid rule at index {}: {}\nHint: every rule needs a non-empty 'from' string",
                index, reason
            ),
            SwapXError::EmptyRuleSet => {
                "Rule set is empty\nHint: provide --rule FROM=TO or a rule document via --config"
                    .to_string()
            }
            SwapXError::PathNotFound(path) => format!("Path not found: {}", path.display()),
            SwapXError::PermissionDenied(path) => format!(
                "Permission denied: {}\nHint: check file ownership and access rights",
                path.display()
            ),
            SwapXError::ReadError { path, source } => {
                format!("Unable to read {}: {}", path.display(), source)
            }
            SwapXError::WriteError { path, source } => {
                format!("Unable to write {}: {}", path.display(), source)
            }
            SwapXError::Timeout { path, limit_ms } => format!(
                "Processing {} timed out after {} ms\nHint: raise --timeout-ms or split the run",
                path.display(),
                limit_ms
            ),
            SwapXError::AlreadyRunning => {
                "A batch is already running on this executor".to_string()
            }
            SwapXError::FileDiscovery { message } => format!(
                "File discovery error: {}\nHint: verify the root path and exclude patterns",
                message
            ),
            SwapXError::CommandExecution(msg) => msg.clone(),
            SwapXError::Other(err) => {
                format!("Unknown error: {}\nHint: please report this issue", err)
            }
        }
    }
}

// Unit test: SwapXError error types and helper methods
#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_config_error_creation() {
        let error = SwapXError::config("test config error");
        assert!(matches!(error, SwapXError::Config { .. }));
        assert_eq!(error.to_string(), "Configuration error: test config error");
    }

    #[test]
    fn test_invalid_rule_error_creation() {
        let error = SwapXError::rule(3, "'from' must not be empty");
        assert!(matches!(error, SwapXError::InvalidRule { index: 3, .. }));
        let msg = error.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("'from' must not be empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let swapx_error: SwapXError = io_error.into();
        assert!(matches!(swapx_error, SwapXError::Io(_)));
    }

    #[test]
    fn test_read_failure_classification() {
        let path = Path::new("/missing/file.txt");
        let not_found = SwapXError::read_failure(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(not_found, SwapXError::PathNotFound(_)));

        let denied =
            SwapXError::read_failure(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, SwapXError::PermissionDenied(_)));

        let other = SwapXError::read_failure(path, io::Error::other("disk on fire"));
        assert!(matches!(other, SwapXError::ReadError { .. }));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SwapXError::config("test").exit_code(), 2);
        assert_eq!(SwapXError::EmptyRuleSet.exit_code(), 3);
        assert_eq!(SwapXError::rule(0, "test").exit_code(), 3);
        assert_eq!(SwapXError::AlreadyRunning.exit_code(), 7);
    }

    #[test]
    fn test_user_friendly_messages() {
        let config_error = SwapXError::config("missing key");
        let message = config_error.user_friendly_message();
        assert!(message.contains("Configuration error:"));
        assert!(message.contains("swapx config --help"));

        let empty = SwapXError::EmptyRuleSet.user_friendly_message();
        assert!(empty.contains("--rule FROM=TO"));
    }
}
