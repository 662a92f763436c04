//! Batch result, progress, and summary types, plus the event stream.
//!
//! Workers never mutate shared statistics; they return a [`FileResult`]
//! per file and the executor's single aggregation loop folds those into
//! the [`BatchSummary`] while emitting [`ProgressEvent`]s with strictly
//! increasing `current` values. Observers receive a stream of
//! [`BatchEvent::Progress`] items terminated by exactly one
//! [`BatchEvent::Completed`].

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::processor::RuleCount;

/// Why a file was skipped rather than processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sniffing prefix contained NUL bytes or the content was not
    /// valid UTF-8.
    LikelyBinary,
    /// File size at or above the oversize cap; content never read.
    Oversize,
    /// The batch was cancelled before this file was dequeued.
    Cancelled,
}

impl SkipReason {
    /// Stable machine-readable reason string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::LikelyBinary => "likely-binary",
            SkipReason::Oversize => "oversize",
            SkipReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable kind of a per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// File vanished between discovery and processing.
    PathNotFound,
    /// Access denied while reading or writing.
    PermissionDenied,
    /// Read failed for another reason.
    Read,
    /// Write failed for another reason.
    Write,
    /// The per-file timeout elapsed.
    Timeout,
}

impl FailureKind {
    /// Stable machine-readable kind string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::PathNotFound => "path-not-found",
            FailureKind::PermissionDenied => "permission-denied",
            FailureKind::Read => "read-error",
            FailureKind::Write => "write-error",
            FailureKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of one file's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content changed and (unless dry-run) was written back.
    Modified,
    /// Processed but no rule changed the content.
    Unchanged,
    /// Not processed; see the reason.
    Skipped(SkipReason),
    /// Pipeline failed; the batch continues unless configured otherwise.
    Failed(FailureKind, String),
}

/// Result of one file's trip through the pipeline.
#[derive(Debug, Clone)]
pub struct FileResult {
    /// The file's absolute path.
    pub path: PathBuf,
    /// Terminal outcome.
    pub outcome: FileOutcome,
    /// Total substitutions in this file (counted even under dry-run).
    pub replacements: usize,
    /// Per-rule substitution counts for enabled rules.
    pub rule_counts: Vec<RuleCount>,
    /// File size before processing.
    pub bytes_before: u64,
    /// Content size after processing (equals `bytes_before` for
    /// skipped/failed files).
    pub bytes_after: u64,
}

impl FileResult {
    /// Shorthand for a skipped result.
    pub fn skipped(path: PathBuf, size: u64, reason: SkipReason) -> Self {
        Self {
            path,
            outcome: FileOutcome::Skipped(reason),
            replacements: 0,
            rule_counts: Vec::new(),
            bytes_before: size,
            bytes_after: size,
        }
    }

    /// Shorthand for a failed result.
    pub fn failed(path: PathBuf, size: u64, kind: FailureKind, message: String) -> Self {
        Self {
            path,
            outcome: FileOutcome::Failed(kind, message),
            replacements: 0,
            rule_counts: Vec::new(),
            bytes_before: size,
            bytes_after: size,
        }
    }
}

/// One error entry in the batch summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    /// The file the failure belongs to.
    pub path: PathBuf,
    /// Stable machine-readable kind (see [`FailureKind::as_str`]).
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Incremental progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Number of files visited so far (1-based, strictly increasing).
    pub current: usize,
    /// Total files in the batch.
    pub total: usize,
    /// Path of the file this event reports.
    pub path: PathBuf,
    /// Cumulative count of modified files.
    pub files_modified: usize,
    /// Cumulative substitution count.
    pub total_replacements: usize,
    /// Milliseconds since the Unix epoch at emission time.
    pub timestamp_ms: u64,
}

impl ProgressEvent {
    pub(crate) fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Terminal aggregate report of a batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Files handed to the executor.
    pub files_total: usize,
    /// Files whose pipeline ran to a non-skip outcome (modified,
    /// unchanged, or failed).
    pub files_processed: usize,
    /// Files whose content changed (or would change, under dry-run).
    pub files_modified: usize,
    /// Files skipped (likely-binary, oversize, cancelled).
    pub files_skipped: usize,
    /// Files whose pipeline failed.
    pub files_failed: usize,
    /// Substitutions across every file.
    pub total_replacements: usize,
    /// Grand totals per rule id, in rule order.
    pub rule_totals: Vec<RuleCount>,
    /// Every per-file failure, in completion order.
    pub errors: Vec<BatchError>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// True when the run ended through cancellation (explicit, stop-on-
    /// error, or the error threshold).
    pub cancelled: bool,
}

/// One item on the subscribable event stream.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Incremental progress; zero or more per run.
    Progress(ProgressEvent),
    /// Terminal summary; exactly one per run, after all progress events.
    Completed(BatchSummary),
}
