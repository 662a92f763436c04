//! Concurrent batch execution for the replacement pipeline.
//!
//! This module drives the per-file pipeline (read → process → write →
//! report) across a discovered file list with bounded concurrency and a
//! cooperative lifecycle:
//!
//! ```text
//! IDLE ──start──▶ RUNNING ──complete──▶ DONE
//!                  │  ▲
//!             pause│  │resume
//!                  ▼  │
//!                PAUSED
//!                  │
//!             cancel (from RUNNING or PAUSED)
//!                  ▼
//!              CANCELLED ──▶ DONE(cancelled=true)
//! ```
//!
//! Workers return per-file results to the executor's single aggregation
//! loop; no statistics are shared mutably between tasks. Progress events
//! are emitted by that loop alone, so `current` is strictly increasing
//! even though file completion order is not deterministic. Exactly one
//! [`BatchSummary`] terminates the event stream.

mod events;
mod executor;
mod options;

pub use events::{
    BatchError, BatchEvent, BatchSummary, FailureKind, FileOutcome, FileResult, ProgressEvent,
    SkipReason,
};
pub use executor::{BatchController, BatchExecutor, BatchState};
pub use options::BatchOptions;

use std::sync::Arc;

use crate::Result;
use crate::core::discovery::FileDescriptor;
use crate::core::rules::RuleSet;

/// Convenience wrapper: execute a batch with a progress callback.
///
/// Creates a one-shot [`BatchExecutor`], wires `on_progress` as the
/// observer, and awaits the terminal summary. Callers that need pause,
/// resume, or cancel should construct the executor directly and keep its
/// [`BatchController`].
pub async fn process_batch<F>(
    files: Vec<FileDescriptor>,
    rules: Arc<RuleSet>,
    options: BatchOptions,
    on_progress: F,
) -> Result<BatchSummary>
where
    F: Fn(&ProgressEvent) + Send + Sync + 'static,
{
    let executor = BatchExecutor::new(rules, options).with_progress_hook(on_progress);
    executor.run(files).await
}
