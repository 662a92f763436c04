//! Read-only preview of a batch run.
//!
//! The preview engine executes the replacement pipeline in dry-run mode
//! over a bounded prefix of the file list and derives statistics, bounded
//! change samples with context, a qualitative risk assessment, and a
//! projected duration for the full run. It has no write path at all: the
//! only file operations it performs are reads.

pub mod risk;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::discovery::FileDescriptor;
use crate::core::io::{FileIo, ReadOutcome};
use crate::core::processor::{ChangeRecord, ContentProcessor, RuleCount, SampleOptions};
use crate::core::rules::RuleSet;
use crate::Result;

pub use risk::{RiskAssessment, RiskFactor, RiskLevel};

/// Bounds applied while sampling.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    /// Maximum files analyzed; the rest of the list only contributes to
    /// the projection.
    pub max_files: usize,
    /// Maximum change samples kept per analyzed file.
    pub samples_per_file: usize,
    /// Context lines captured around each sample.
    pub context_lines: usize,
    /// Streaming threshold forwarded to the reader.
    pub stream_size_threshold_bytes: u64,
    /// Oversize cap forwarded to the reader.
    pub oversize_limit_bytes: u64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_files: 10,
            samples_per_file: 5,
            context_lines: 2,
            stream_size_threshold_bytes:
                crate::core::batch::BatchOptions::DEFAULT_STREAM_SIZE_THRESHOLD,
            oversize_limit_bytes: crate::core::batch::BatchOptions::DEFAULT_OVERSIZE_LIMIT,
        }
    }
}

/// Headline numbers of a preview.
#[derive(Debug, Clone)]
pub struct PreviewOverview {
    /// Files in the full candidate list.
    pub files_total: usize,
    /// Files actually read and processed for the preview.
    pub files_analyzed: usize,
    /// Analyzed files that would change.
    pub files_with_changes: usize,
    /// Substitutions across analyzed files.
    pub total_replacements: usize,
    /// Enabled rules in the set.
    pub rules_active: usize,
    /// Projected wall-clock duration for the full file list, from the
    /// measured mean per-file time.
    pub estimated_duration: Duration,
}

/// Expected impact of one rule over the analyzed sample.
#[derive(Debug, Clone)]
pub struct RuleImpact {
    /// Rule identifier.
    pub rule_id: String,
    /// The rule's literal pattern, for display.
    pub from: String,
    /// The rule's replacement, for display.
    pub to: String,
    /// Substitutions across analyzed files.
    pub replacements: usize,
    /// Analyzed files the rule touched.
    pub files_touched: usize,
}

/// Per-file slice of the preview.
#[derive(Debug, Clone)]
pub struct FilePreview {
    /// File path.
    pub path: PathBuf,
    /// Whether the file would change.
    pub would_modify: bool,
    /// Substitution count for the file.
    pub replacements: usize,
    /// Bounded change samples with context.
    pub samples: Vec<ChangeRecord>,
    /// Reason string when the file would be skipped, `None` otherwise.
    pub skip_reason: Option<&'static str>,
}

/// Full preview report.
#[derive(Debug, Clone)]
pub struct PreviewReport {
    /// Headline numbers.
    pub overview: PreviewOverview,
    /// Per-rule impact over the sample, in rule order.
    pub rule_impacts: Vec<RuleImpact>,
    /// Per-file details for the analyzed prefix.
    pub file_previews: Vec<FilePreview>,
    /// Qualitative risk with contributing factors.
    pub risk: RiskAssessment,
    /// Human-readable suggestions derived from the findings.
    pub recommendations: Vec<String>,
}

/// Executes the pipeline read-only to characterize a run before it
/// happens.
pub struct PreviewEngine {
    rules: Arc<RuleSet>,
    options: PreviewOptions,
}

impl PreviewEngine {
    /// Create a preview engine over a validated rule set.
    pub fn new(rules: Arc<RuleSet>, options: PreviewOptions) -> Self {
        Self { rules, options }
    }

    /// Analyze a bounded prefix of `files` and assemble the report.
    ///
    /// Files are processed sequentially so repeated previews over the
    /// same inputs produce identical statistics (timing fields aside).
    pub async fn preview(&self, files: &[FileDescriptor]) -> Result<PreviewReport> {
        let io = FileIo::new(
            self.options.stream_size_threshold_bytes,
            self.options.oversize_limit_bytes,
        );
        let processor = ContentProcessor::with_samples(
            Arc::clone(&self.rules),
            SampleOptions {
                max_per_rule: self.options.samples_per_file,
                context_lines: self.options.context_lines,
            },
        );

        let analyze_count = files.len().min(self.options.max_files);
        let mut file_previews = Vec::with_capacity(analyze_count);
        let mut impacts: Vec<RuleImpact> = self
            .rules
            .enabled()
            .map(|rule| RuleImpact {
                rule_id: rule.id.clone(),
                from: rule.from.clone(),
                to: rule.to.clone(),
                replacements: 0,
                files_touched: 0,
            })
            .collect();

        let mut files_with_changes = 0usize;
        let mut total_replacements = 0usize;
        let started = Instant::now();

        for descriptor in &files[..analyze_count] {
            match io.read(descriptor).await {
                Ok(ReadOutcome::Text(text)) => {
                    let outcome = processor.apply(&text);
                    if outcome.modified {
                        files_with_changes += 1;
                    }
                    total_replacements += outcome.total_replacements;
                    merge_impacts(&mut impacts, &outcome.rule_counts);
                    let mut samples = outcome.samples;
                    samples.truncate(self.options.samples_per_file);
                    file_previews.push(FilePreview {
                        path: descriptor.path.clone(),
                        would_modify: outcome.modified,
                        replacements: outcome.total_replacements,
                        samples,
                        skip_reason: None,
                    });
                }
                Ok(ReadOutcome::Skipped(reason)) => {
                    file_previews.push(FilePreview {
                        path: descriptor.path.clone(),
                        would_modify: false,
                        replacements: 0,
                        samples: Vec::new(),
                        skip_reason: Some(reason.as_str()),
                    });
                }
                Err(err) => {
                    log::warn!("preview read failed for {}: {}", descriptor.path.display(), err);
                    file_previews.push(FilePreview {
                        path: descriptor.path.clone(),
                        would_modify: false,
                        replacements: 0,
                        samples: Vec::new(),
                        skip_reason: Some("read-error"),
                    });
                }
            }
        }

        let elapsed = started.elapsed();
        let estimated_duration = if analyze_count > 0 {
            elapsed.mul_f64(files.len() as f64 / analyze_count as f64)
        } else {
            Duration::ZERO
        };

        let risk = risk::assess(
            &self.rules,
            analyze_count,
            files_with_changes,
            total_replacements,
        );
        let recommendations = self.recommendations(&risk, &impacts, files_with_changes);

        Ok(PreviewReport {
            overview: PreviewOverview {
                files_total: files.len(),
                files_analyzed: analyze_count,
                files_with_changes,
                total_replacements,
                rules_active: self.rules.enabled().count(),
                estimated_duration,
            },
            rule_impacts: impacts,
            file_previews,
            risk,
            recommendations,
        })
    }

    fn recommendations(
        &self,
        risk: &RiskAssessment,
        impacts: &[RuleImpact],
        files_with_changes: usize,
    ) -> Vec<String> {
        let mut out = Vec::new();
        match risk.level {
            RiskLevel::High => out.push(
                "High risk: run with --dry-run and inspect the full diff before writing."
                    .to_string(),
            ),
            RiskLevel::Medium => {
                out.push("Review the change samples before running.".to_string())
            }
            RiskLevel::Low => {}
        }
        for impact in impacts {
            if impact.replacements == 0 {
                out.push(format!(
                    "Rule '{}' ('{}') matched nothing in the sample; check the pattern.",
                    impact.rule_id, impact.from
                ));
            }
        }
        if files_with_changes == 0 {
            out.push("No sampled file would change; the run would be a no-op.".to_string());
        }
        out
    }
}

fn merge_impacts(impacts: &mut [RuleImpact], counts: &[RuleCount]) {
    for count in counts {
        if count.count == 0 {
            continue;
        }
        if let Some(impact) = impacts.iter_mut().find(|i| i.rule_id == count.rule_id) {
            impact.replacements += count.count;
            impact.files_touched += 1;
        }
    }
}
