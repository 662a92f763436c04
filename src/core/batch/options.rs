//! Batch execution options.
//!
//! Every option the engine recognizes is an explicit field with a
//! documented default; there is no dynamic option bag, so unknown
//! settings cannot silently pass through.

use crate::core::rules::MatchDefaults;
use crate::{Result, error::SwapXError};

/// Configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Engine-level default for rules that do not set case sensitivity.
    pub case_sensitive: bool,
    /// Engine-level default for rules that do not set whole-word matching.
    pub whole_word: bool,
    /// When true the write step is elided; results still report would-be
    /// modifications and counts.
    pub dry_run: bool,
    /// Maximum number of files processed in parallel.
    pub max_concurrency: usize,
    /// Size at or above which chunked streaming I/O is used.
    pub stream_size_threshold_bytes: u64,
    /// Hard cap above which files are skipped unread.
    pub oversize_limit_bytes: u64,
    /// Cancel the batch on the first per-file failure.
    pub stop_on_error: bool,
    /// Cancel the batch when the failure count exceeds this threshold.
    pub max_errors: usize,
    /// Per-file pipeline time limit in milliseconds; zero disables it.
    pub per_file_timeout_ms: u64,
    /// Emit a progress event every N completed files. The terminal
    /// progress position is always emitted.
    pub progress_interval_items: usize,
}

impl BatchOptions {
    /// Default streaming threshold: 10 MiB.
    pub const DEFAULT_STREAM_SIZE_THRESHOLD: u64 = 10 * 1024 * 1024;
    /// Default oversize cap: 100 MiB.
    pub const DEFAULT_OVERSIZE_LIMIT: u64 = 100 * 1024 * 1024;

    /// Engine matcher defaults derived from these options.
    pub fn match_defaults(&self) -> MatchDefaults {
        MatchDefaults {
            case_sensitive: self.case_sensitive,
            whole_word: self.whole_word,
        }
    }

    /// Validate option values for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(SwapXError::config("max_concurrency must be greater than 0"));
        }
        if self.progress_interval_items == 0 {
            return Err(SwapXError::config(
                "progress_interval_items must be greater than 0",
            ));
        }
        if self.stream_size_threshold_bytes > self.oversize_limit_bytes {
            return Err(SwapXError::config(
                "stream_size_threshold_bytes must not exceed oversize_limit_bytes",
            ));
        }
        Ok(())
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            dry_run: false,
            max_concurrency: 10,
            stream_size_threshold_bytes: Self::DEFAULT_STREAM_SIZE_THRESHOLD,
            oversize_limit_bytes: Self::DEFAULT_OVERSIZE_LIMIT,
            stop_on_error: false,
            max_errors: 50,
            per_file_timeout_ms: 30_000,
            progress_interval_items: 1,
        }
    }
}
