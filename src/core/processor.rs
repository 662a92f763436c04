//! Applies an ordered rule set to one in-memory content value.
//!
//! Rules compose sequentially: rule *N* scans the output of rules
//! 1..*N*−1, so changing the list order changes the result. The processor
//! counts every substitution but bounds the recorded change log to a
//! configurable number of samples per rule, which keeps memory flat on
//! pathological files while preview output stays useful.

use std::sync::Arc;

use crate::core::rules::matcher::{self, MatchSpan};
use crate::core::rules::RuleSet;

/// Bounds for the recorded change log.
#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    /// Maximum change records kept per rule per file. Substitutions past
    /// the cap are still counted.
    pub max_per_rule: usize,
    /// Lines of surrounding context captured with each record. Zero
    /// disables context capture (batch runs); previews use a small window.
    pub context_lines: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            max_per_rule: 10,
            context_lines: 0,
        }
    }
}

/// Evidence of one applied substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Identifier of the rule that produced the substitution.
    pub rule_id: String,
    /// Pre-image (the rule's `from`).
    pub from: String,
    /// Post-image (the rule's `to`).
    pub to: String,
    /// 1-based occurrence number of this substitution for its rule within
    /// the current file.
    pub nth: usize,
    /// 1-based line number of the match in the content the rule scanned.
    pub line: usize,
    /// Context lines around the match (the matched line plus up to
    /// `context_lines` neighbors on each side), empty when capture is
    /// disabled.
    pub context: Vec<String>,
}

/// Substitution count for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCount {
    /// Rule identifier.
    pub rule_id: String,
    /// Substitutions performed by that rule.
    pub count: usize,
}

/// Result of applying the full rule set to one content value.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Content after all enabled rules ran.
    pub content: String,
    /// True iff at least one rule actually changed the content. A rule
    /// whose replacement equals its pattern counts matches without
    /// setting this.
    pub modified: bool,
    /// Total substitutions across all rules.
    pub total_replacements: usize,
    /// Per-rule counts for every enabled rule, in application order.
    pub rule_counts: Vec<RuleCount>,
    /// Bounded change log.
    pub samples: Vec<ChangeRecord>,
}

/// Applies an ordered, validated rule set to text content.
#[derive(Debug, Clone)]
pub struct ContentProcessor {
    rules: Arc<RuleSet>,
    samples: SampleOptions,
}

impl ContentProcessor {
    /// Create a processor with sampling disabled beyond the default cap.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            samples: SampleOptions::default(),
        }
    }

    /// Create a processor with explicit sample bounds.
    pub fn with_samples(rules: Arc<RuleSet>, samples: SampleOptions) -> Self {
        Self { rules, samples }
    }

    /// Apply every enabled rule, in order, to `content`.
    pub fn apply(&self, content: &str) -> ProcessOutcome {
        let mut rule_counts = Vec::new();
        let mut samples = Vec::new();

        if content.is_empty() {
            for rule in self.rules.enabled() {
                rule_counts.push(RuleCount {
                    rule_id: rule.id.clone(),
                    count: 0,
                });
            }
            return ProcessOutcome {
                content: String::new(),
                modified: false,
                total_replacements: 0,
                rule_counts,
                samples,
            };
        }

        let mut current = content.to_string();
        let mut total = 0usize;
        let mut modified = false;

        for rule in self.rules.enabled() {
            let pass = matcher::find_and_replace(&current, rule);
            if pass.count > 0 {
                total += pass.count;
                if pass.output != current {
                    modified = true;
                }
                self.record_samples(&mut samples, &current, rule, &pass.spans);
                current = pass.output;
            }
            rule_counts.push(RuleCount {
                rule_id: rule.id.clone(),
                count: pass.count,
            });
        }

        ProcessOutcome {
            content: current,
            modified,
            total_replacements: total,
            rule_counts,
            samples,
        }
    }

    /// Record up to the per-rule cap of change records for one pass.
    ///
    /// Line numbers and context are resolved against the content the rule
    /// scanned (its pass input), which is what the spans refer to.
    fn record_samples(
        &self,
        samples: &mut Vec<ChangeRecord>,
        pass_input: &str,
        rule: &crate::core::rules::Rule,
        spans: &[MatchSpan],
    ) {
        for (i, span) in spans.iter().take(self.samples.max_per_rule).enumerate() {
            let line = 1 + pass_input[..span.start].matches('\n').count();
            let context = if self.samples.context_lines > 0 {
                context_window(pass_input, line, self.samples.context_lines)
            } else {
                Vec::new()
            };
            samples.push(ChangeRecord {
                rule_id: rule.id.clone(),
                from: rule.from.clone(),
                to: rule.to.clone(),
                nth: i + 1,
                line,
                context,
            });
        }
    }
}

/// Collect the lines `center ± radius` (1-based, clamped to the content).
fn context_window(content: &str, center: usize, radius: usize) -> Vec<String> {
    let first = center.saturating_sub(radius).max(1);
    content
        .lines()
        .enumerate()
        .skip(first - 1)
        .take_while(|(idx, _)| idx + 1 <= center + radius)
        .map(|(_, line)| line.to_string())
        .collect()
}
