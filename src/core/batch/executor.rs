//! The batch executor: lifecycle, bounded concurrency, and aggregation.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::Notify;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

use crate::core::batch::{
    BatchError, BatchEvent, BatchOptions, BatchSummary, FailureKind, FileOutcome, FileResult,
    ProgressEvent, SkipReason,
};
use crate::core::discovery::FileDescriptor;
use crate::core::io::{FileIo, ReadOutcome};
use crate::core::processor::{ContentProcessor, RuleCount};
use crate::core::rules::RuleSet;
use crate::{Result, error::SwapXError};

/// Lifecycle states of a batch executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Constructed, not yet started.
    Idle,
    /// Files are being dequeued and processed.
    Running,
    /// Dequeueing is suspended; in-flight files finish normally.
    Paused,
    /// Cancellation observed; remaining queue entries become skips.
    Cancelled,
    /// Terminal: the summary has been produced.
    Done,
}

/// Why the run was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CancelReason {
    Requested,
    StopOnError,
    ErrorThreshold,
}

impl CancelReason {
    fn as_str(&self) -> &'static str {
        match self {
            CancelReason::Requested => "requested",
            CancelReason::StopOnError => "stop-on-error",
            CancelReason::ErrorThreshold => "error-threshold",
        }
    }
}

struct ControlInner {
    state: BatchState,
    cancelled: bool,
    reason: Option<CancelReason>,
}

/// Shared control block observed by the executor at its suspension
/// points. All transitions go through this block so the state machine has
/// a single authority.
struct BatchControl {
    inner: Mutex<ControlInner>,
    notify: Notify,
}

impl BatchControl {
    fn new() -> Self {
        Self {
            inner: Mutex::new(ControlInner {
                state: BatchState::Idle,
                cancelled: false,
                reason: None,
            }),
            notify: Notify::new(),
        }
    }

    fn try_start(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != BatchState::Idle {
            return Err(SwapXError::AlreadyRunning);
        }
        inner.state = if inner.cancelled {
            BatchState::Cancelled
        } else {
            BatchState::Running
        };
        Ok(())
    }

    fn pause(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == BatchState::Running {
            inner.state = BatchState::Paused;
            self.notify.notify_one();
            true
        } else {
            false
        }
    }

    fn resume(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == BatchState::Paused {
            inner.state = BatchState::Running;
            self.notify.notify_one();
            true
        } else {
            false
        }
    }

    fn cancel_with(&self, reason: CancelReason) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == BatchState::Done || inner.cancelled {
            return false;
        }
        inner.cancelled = true;
        inner.reason = Some(reason);
        if inner.state != BatchState::Idle {
            inner.state = BatchState::Cancelled;
        }
        self.notify.notify_one();
        true
    }

    fn finish(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = if inner.cancelled {
            BatchState::Cancelled
        } else {
            BatchState::Done
        };
    }

    fn state(&self) -> BatchState {
        self.inner.lock().unwrap().state
    }

    fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().state == BatchState::Paused
    }

    fn is_cancelled(&self) -> bool {
        self.inner.lock().unwrap().cancelled
    }

    fn cancel_reason(&self) -> Option<CancelReason> {
        self.inner.lock().unwrap().reason
    }

    async fn changed(&self) {
        self.notify.notified().await;
    }
}

/// Cloneable handle for pausing, resuming, or cancelling a running batch.
#[derive(Clone)]
pub struct BatchController {
    control: Arc<BatchControl>,
}

impl BatchController {
    /// Suspend dequeueing; in-flight files complete normally. Returns
    /// false when the batch is not running.
    pub fn pause(&self) -> bool {
        self.control.pause()
    }

    /// Re-enable dequeueing after a pause.
    pub fn resume(&self) -> bool {
        self.control.resume()
    }

    /// Request cooperative cancellation. Queued files are skipped with
    /// reason `cancelled`; in-flight files run to natural completion so
    /// the atomic-write guarantee holds. Returns false when already
    /// cancelled or done.
    pub fn cancel(&self) -> bool {
        self.control.cancel_with(CancelReason::Requested)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.control.state()
    }
}

/// Folds per-file results into the batch totals.
///
/// Owned exclusively by the executor's aggregation loop; workers never
/// touch it.
struct SummaryAggregator {
    files_total: usize,
    files_processed: usize,
    files_modified: usize,
    files_skipped: usize,
    files_failed: usize,
    total_replacements: usize,
    rule_totals: Vec<RuleCount>,
    errors: Vec<BatchError>,
}

impl SummaryAggregator {
    fn new(rules: &RuleSet, files_total: usize) -> Self {
        let rule_totals = rules
            .enabled()
            .map(|rule| RuleCount {
                rule_id: rule.id.clone(),
                count: 0,
            })
            .collect();
        Self {
            files_total,
            files_processed: 0,
            files_modified: 0,
            files_skipped: 0,
            files_failed: 0,
            total_replacements: 0,
            rule_totals,
            errors: Vec::new(),
        }
    }

    fn record(&mut self, result: &FileResult) {
        match &result.outcome {
            FileOutcome::Modified => {
                self.files_processed += 1;
                self.files_modified += 1;
            }
            FileOutcome::Unchanged => self.files_processed += 1,
            FileOutcome::Skipped(_) => self.files_skipped += 1,
            FileOutcome::Failed(kind, message) => {
                self.files_processed += 1;
                self.files_failed += 1;
                self.errors.push(BatchError {
                    path: result.path.clone(),
                    kind: kind.as_str(),
                    message: message.clone(),
                });
            }
        }
        self.total_replacements += result.replacements;
        for count in &result.rule_counts {
            if let Some(total) = self
                .rule_totals
                .iter_mut()
                .find(|t| t.rule_id == count.rule_id)
            {
                total.count += count.count;
            }
        }
    }

    fn finish(self, elapsed: Duration, cancelled: bool) -> BatchSummary {
        BatchSummary {
            files_total: self.files_total,
            files_processed: self.files_processed,
            files_modified: self.files_modified,
            files_skipped: self.files_skipped,
            files_failed: self.files_failed,
            total_replacements: self.total_replacements,
            rule_totals: self.rule_totals,
            errors: self.errors,
            elapsed,
            cancelled,
        }
    }
}

/// Tracks what the single emitter has sent so far.
struct EmitState {
    last_emitted: usize,
    last_path: PathBuf,
}

/// Orchestrates the replacement pipeline over a file list.
///
/// An executor is one-shot: `run` may be called once; afterwards the
/// state is terminal and a new executor must be created for the next
/// batch (the rule set is immutable for the duration of a run).
pub struct BatchExecutor {
    rules: Arc<RuleSet>,
    options: BatchOptions,
    control: Arc<BatchControl>,
    senders: Mutex<Vec<UnboundedSender<BatchEvent>>>,
    progress_hook: Option<Arc<dyn Fn(&ProgressEvent) + Send + Sync>>,
}

impl BatchExecutor {
    /// Create an executor for one batch run.
    pub fn new(rules: Arc<RuleSet>, options: BatchOptions) -> Self {
        Self {
            rules,
            options,
            control: Arc::new(BatchControl::new()),
            senders: Mutex::new(Vec::new()),
            progress_hook: None,
        }
    }

    /// Install a synchronous progress observer called from the emitter.
    pub fn with_progress_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.progress_hook = Some(Arc::new(hook));
        self
    }

    /// Control handle valid for the lifetime of the run.
    pub fn controller(&self) -> BatchController {
        BatchController {
            control: Arc::clone(&self.control),
        }
    }

    /// Subscribe to the event stream: progress events terminated by
    /// exactly one completed-summary event.
    pub fn subscribe(&self) -> UnboundedReceiver<BatchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().unwrap().push(tx);
        rx
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.control.state()
    }

    /// Execute the batch over `files` and return the terminal summary.
    ///
    /// # Errors
    ///
    /// - [`SwapXError::Config`] when the options fail validation.
    /// - [`SwapXError::AlreadyRunning`] when the executor was started
    ///   before.
    ///
    /// Per-file failures do not error the run; they surface in the
    /// summary's error list.
    pub async fn run(&self, files: Vec<FileDescriptor>) -> Result<BatchSummary> {
        self.options.validate()?;
        self.control.try_start()?;

        let started = Instant::now();
        let total = files.len();
        let io = FileIo::from_options(&self.options);
        let processor = ContentProcessor::new(Arc::clone(&self.rules));

        let mut queue: VecDeque<FileDescriptor> = files.into();
        let mut inflight: JoinSet<FileResult> = JoinSet::new();
        let mut aggregator = SummaryAggregator::new(&self.rules, total);
        let mut current = 0usize;
        let mut emit = EmitState {
            last_emitted: 0,
            last_path: PathBuf::new(),
        };

        loop {
            while !self.control.is_paused()
                && !self.control.is_cancelled()
                && inflight.len() < self.options.max_concurrency
            {
                let Some(descriptor) = queue.pop_front() else {
                    break;
                };
                let processor = processor.clone();
                let io = io.clone();
                let dry_run = self.options.dry_run;
                let timeout_ms = self.options.per_file_timeout_ms;
                inflight.spawn(async move {
                    run_pipeline_with_timeout(descriptor, processor, io, dry_run, timeout_ms).await
                });
            }

            if inflight.is_empty() {
                if queue.is_empty() || self.control.is_cancelled() {
                    break;
                }
                // paused with an idle pipeline: wait for a control change
                self.control.changed().await;
                continue;
            }

            tokio::select! {
                joined = inflight.join_next() => {
                    let result = unwrap_joined(joined);
                    current += 1;
                    aggregator.record(&result);
                    self.emit_progress(&mut emit, current, total, &result, &aggregator, false);
                    self.apply_failure_policy(&result, &aggregator);
                }
                _ = self.control.changed() => {}
            }
        }

        // Cancelled with work in flight: those files complete naturally.
        while let Some(joined) = inflight.join_next().await {
            let result = unwrap_joined(Some(joined));
            current += 1;
            aggregator.record(&result);
            self.emit_progress(&mut emit, current, total, &result, &aggregator, false);
        }

        // Remaining queue entries were never started.
        for descriptor in queue.drain(..) {
            let result =
                FileResult::skipped(descriptor.path, descriptor.size, SkipReason::Cancelled);
            current += 1;
            aggregator.record(&result);
            self.emit_progress(&mut emit, current, total, &result, &aggregator, false);
        }

        // Coalescing must not swallow the terminal progress position.
        if current > 0 && emit.last_emitted < current {
            let path = emit.last_path.clone();
            self.emit_progress_at(&mut emit, current, total, &path, &aggregator);
        }

        let cancelled = self.control.is_cancelled();
        if let Some(reason) = self.control.cancel_reason() {
            log::warn!("batch cancelled ({})", reason.as_str());
        }
        self.control.finish();

        let summary = aggregator.finish(started.elapsed(), cancelled);
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|tx| tx.send(BatchEvent::Completed(summary.clone())).is_ok());
        Ok(summary)
    }

    fn emit_progress(
        &self,
        emit: &mut EmitState,
        current: usize,
        total: usize,
        result: &FileResult,
        aggregator: &SummaryAggregator,
        force: bool,
    ) {
        emit.last_path = result.path.clone();
        if !force && current % self.options.progress_interval_items != 0 {
            return;
        }
        let path = result.path.clone();
        self.emit_progress_at(emit, current, total, &path, aggregator);
    }

    fn emit_progress_at(
        &self,
        emit: &mut EmitState,
        current: usize,
        total: usize,
        path: &std::path::Path,
        aggregator: &SummaryAggregator,
    ) {
        let event = ProgressEvent {
            current,
            total,
            path: path.to_path_buf(),
            files_modified: aggregator.files_modified,
            total_replacements: aggregator.total_replacements,
            timestamp_ms: ProgressEvent::now_ms(),
        };
        if let Some(hook) = &self.progress_hook {
            hook(&event);
        }
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|tx| tx.send(BatchEvent::Progress(event.clone())).is_ok());
        emit.last_emitted = current;
    }

    fn apply_failure_policy(&self, result: &FileResult, aggregator: &SummaryAggregator) {
        if !matches!(result.outcome, FileOutcome::Failed(..)) {
            return;
        }
        if self.options.stop_on_error {
            self.control.cancel_with(CancelReason::StopOnError);
        } else if aggregator.files_failed > self.options.max_errors {
            self.control.cancel_with(CancelReason::ErrorThreshold);
        }
    }
}

/// Map a join outcome to a file result, converting worker panics into
/// failed results so the accounting stays complete.
fn unwrap_joined(joined: Option<std::result::Result<FileResult, tokio::task::JoinError>>) -> FileResult {
    match joined {
        Some(Ok(result)) => result,
        Some(Err(join_err)) => {
            log::warn!("worker task aborted: {}", join_err);
            FileResult::failed(
                PathBuf::new(),
                0,
                FailureKind::Read,
                format!("worker task aborted: {}", join_err),
            )
        }
        None => unreachable!("join_next polled with an empty set"),
    }
}

/// Per-file pipeline with the optional timeout wrapped around it.
async fn run_pipeline_with_timeout(
    descriptor: FileDescriptor,
    processor: ContentProcessor,
    io: FileIo,
    dry_run: bool,
    timeout_ms: u64,
) -> FileResult {
    let path = descriptor.path.clone();
    let size = descriptor.size;
    if timeout_ms == 0 {
        return run_pipeline(descriptor, processor, io, dry_run).await;
    }
    match tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        run_pipeline(descriptor, processor, io, dry_run),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => FileResult::failed(
            path.clone(),
            size,
            FailureKind::Timeout,
            format!(
                "processing {} exceeded {} ms",
                path.display(),
                timeout_ms
            ),
        ),
    }
}

/// read → process → write (unless dry-run). Never propagates errors; every
/// exit is a `FileResult`.
async fn run_pipeline(
    descriptor: FileDescriptor,
    processor: ContentProcessor,
    io: FileIo,
    dry_run: bool,
) -> FileResult {
    let path = descriptor.path.clone();
    let size = descriptor.size;

    let text = match io.read(&descriptor).await {
        Ok(ReadOutcome::Text(text)) => text,
        Ok(ReadOutcome::Skipped(reason)) => {
            log::debug!("skipping {} ({})", path.display(), reason);
            return FileResult::skipped(path, size, reason);
        }
        Err(err) => {
            return FileResult::failed(path, size, failure_kind_of(&err), err.to_string());
        }
    };

    let outcome = processor.apply(&text);
    let bytes_after = outcome.content.len() as u64;

    if outcome.modified && !dry_run {
        if let Err(err) = io.write(&descriptor, &outcome.content).await {
            return FileResult::failed(path, size, failure_kind_of(&err), err.to_string());
        }
    }

    FileResult {
        path,
        outcome: if outcome.modified {
            FileOutcome::Modified
        } else {
            FileOutcome::Unchanged
        },
        replacements: outcome.total_replacements,
        rule_counts: outcome.rule_counts,
        bytes_before: size,
        bytes_after,
    }
}

fn failure_kind_of(err: &SwapXError) -> FailureKind {
    match err {
        SwapXError::PathNotFound(_) => FailureKind::PathNotFound,
        SwapXError::PermissionDenied(_) => FailureKind::PermissionDenied,
        SwapXError::WriteError { .. } => FailureKind::Write,
        SwapXError::Timeout { .. } => FailureKind::Timeout,
        _ => FailureKind::Read,
    }
}

// Unit tests: lifecycle, policies, and the end-to-end pipeline
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{MatchDefaults, RuleSpec};
    use std::fs;
    use tempfile::TempDir;

    fn rule_set(specs: Vec<RuleSpec>) -> Arc<RuleSet> {
        Arc::new(RuleSet::validate(specs, &MatchDefaults::default()).unwrap())
    }

    fn descriptor_for(path: &std::path::Path) -> FileDescriptor {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        FileDescriptor {
            path: path.to_path_buf(),
            size,
            streaming: false,
        }
    }

    #[tokio::test]
    async fn test_ordered_cascade_end_to_end() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "alpha").unwrap();

        let rules = rule_set(vec![
            RuleSpec::new("alpha", "beta"),
            RuleSpec::new("beta", "gamma"),
        ]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        let summary = executor.run(vec![descriptor_for(&path)]).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "gamma");
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_modified, 1);
        assert_eq!(summary.total_replacements, 2);
        assert_eq!(summary.rule_totals[0].count, 1);
        assert_eq!(summary.rule_totals[1].count, 1);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn test_dry_run_preserves_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.txt");
        fs::write(&path, "hello").unwrap();

        let rules = rule_set(vec![RuleSpec::new("hello", "world")]);
        let options = BatchOptions {
            dry_run: true,
            ..BatchOptions::default()
        };
        let executor = BatchExecutor::new(rules, options);
        let summary = executor.run(vec![descriptor_for(&path)]).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(summary.files_modified, 1, "dry-run still reports impact");
        assert_eq!(summary.total_replacements, 1);
    }

    #[tokio::test]
    async fn test_cancel_before_first_dequeue() {
        let temp = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..5 {
            let path = temp.path().join(format!("f{}.txt", i));
            fs::write(&path, "hello").unwrap();
            files.push(descriptor_for(&path));
        }

        let rules = rule_set(vec![RuleSpec::new("hello", "bye")]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        executor.controller().cancel();
        let summary = executor.run(files).await.unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.files_processed, 0);
        assert_eq!(summary.files_skipped, 5);
        for i in 0..5 {
            let path = temp.path().join(format!("f{}.txt", i));
            assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        }
    }

    #[tokio::test]
    async fn test_second_run_fails_already_running() {
        let rules = rule_set(vec![RuleSpec::new("a", "b")]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        executor.run(Vec::new()).await.unwrap();
        let second = executor.run(Vec::new()).await;
        assert!(matches!(second, Err(SwapXError::AlreadyRunning)));
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let temp = TempDir::new().unwrap();
        let good = temp.path().join("good.txt");
        fs::write(&good, "hello").unwrap();
        let missing = FileDescriptor {
            path: temp.path().join("missing.txt"),
            size: 0,
            streaming: false,
        };

        let rules = rule_set(vec![RuleSpec::new("hello", "bye")]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        let summary = executor
            .run(vec![missing, descriptor_for(&good)])
            .await
            .unwrap();

        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_modified, 1);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].kind, "path-not-found");
        assert!(!summary.cancelled);
        assert_eq!(fs::read_to_string(&good).unwrap(), "bye");
    }

    #[tokio::test]
    async fn test_stop_on_error_cancels_remaining() {
        let temp = TempDir::new().unwrap();
        let mut files = vec![FileDescriptor {
            path: temp.path().join("missing.txt"),
            size: 0,
            streaming: false,
        }];
        for i in 0..20 {
            let path = temp.path().join(format!("f{:02}.txt", i));
            fs::write(&path, "hello").unwrap();
            files.push(descriptor_for(&path));
        }

        let rules = rule_set(vec![RuleSpec::new("hello", "bye")]);
        let options = BatchOptions {
            stop_on_error: true,
            max_concurrency: 1,
            ..BatchOptions::default()
        };
        let executor = BatchExecutor::new(rules, options);
        let summary = executor.run(files).await.unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.files_failed, 1);
        assert!(summary.files_skipped > 0, "queued files become skips");
    }

    #[tokio::test]
    async fn test_error_threshold_cancels() {
        let temp = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..10 {
            files.push(FileDescriptor {
                path: temp.path().join(format!("missing{}.txt", i)),
                size: 0,
                streaming: false,
            });
        }

        let rules = rule_set(vec![RuleSpec::new("a", "b")]);
        let options = BatchOptions {
            max_errors: 2,
            max_concurrency: 1,
            ..BatchOptions::default()
        };
        let executor = BatchExecutor::new(rules, options);
        let summary = executor.run(files).await.unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.files_failed, 3, "threshold is exceeded, not met");
        assert_eq!(summary.files_skipped, 7);
    }

    #[tokio::test]
    async fn test_progress_events_strictly_increasing() {
        let temp = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..25 {
            let path = temp.path().join(format!("f{:02}.txt", i));
            fs::write(&path, "hello world").unwrap();
            files.push(descriptor_for(&path));
        }

        let rules = rule_set(vec![RuleSpec::new("hello", "bye")]);
        let options = BatchOptions {
            max_concurrency: 4,
            ..BatchOptions::default()
        };
        let executor = BatchExecutor::new(rules, options);
        let mut events = executor.subscribe();
        let summary = executor.run(files).await.unwrap();

        let mut seen = Vec::new();
        let mut completed = 0;
        while let Ok(event) = events.try_recv() {
            match event {
                BatchEvent::Progress(p) => seen.push(p.current),
                BatchEvent::Completed(_) => completed += 1,
            }
        }
        assert_eq!(completed, 1, "exactly one terminal event");
        assert_eq!(seen, (1..=25).collect::<Vec<_>>());
        assert_eq!(
            seen.last().copied().unwrap(),
            summary.files_processed + summary.files_skipped
        );
    }

    #[tokio::test]
    async fn test_progress_coalescing_still_emits_terminal_position() {
        let temp = TempDir::new().unwrap();
        let mut files = Vec::new();
        for i in 0..7 {
            let path = temp.path().join(format!("f{}.txt", i));
            fs::write(&path, "hello").unwrap();
            files.push(descriptor_for(&path));
        }

        let rules = rule_set(vec![RuleSpec::new("hello", "bye")]);
        let options = BatchOptions {
            progress_interval_items: 3,
            max_concurrency: 1,
            ..BatchOptions::default()
        };
        let executor = BatchExecutor::new(rules, options);
        let mut events = executor.subscribe();
        executor.run(files).await.unwrap();

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let BatchEvent::Progress(p) = event {
                seen.push(p.current);
            }
        }
        assert_eq!(seen, vec![3, 6, 7], "terminal position always emitted");
    }

    #[tokio::test]
    async fn test_from_equals_to_reports_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("same.txt");
        fs::write(&path, "same text").unwrap();

        let rules = rule_set(vec![RuleSpec::new("same", "same")]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        let summary = executor.run(vec![descriptor_for(&path)]).await.unwrap();

        assert_eq!(summary.files_modified, 0);
        assert_eq!(summary.total_replacements, 1);
    }

    #[tokio::test]
    async fn test_binary_file_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, b"\x00\x01binary").unwrap();

        let rules = rule_set(vec![RuleSpec::new("binary", "text")]);
        let executor = BatchExecutor::new(rules, BatchOptions::default());
        let summary = executor.run(vec![descriptor_for(&path)]).await.unwrap();

        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_processed, 0);
        assert_eq!(fs::read(&path).unwrap(), b"\x00\x01binary");
    }
}
