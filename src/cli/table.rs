//! Table formatting utilities for displaying structured CLI output.
//!
//! This module renders the batch summary and the preview report as
//! terminal tables. All tables use a consistent rounded border style with
//! left-aligned content rows so output reads well in both light and dark
//! terminal themes.
//!
//! # Examples
//!
//! ```rust
//! use swapx_cli::cli::table::{RuleImpactRow, create_rule_impact_table};
//!
//! let rows = vec![RuleImpactRow {
//!     rule: "rule_1".to_string(),
//!     from: "alpha".to_string(),
//!     to: "beta".to_string(),
//!     replacements: "3".to_string(),
//!     files: "2".to_string(),
//! }];
//! println!("{}", create_rule_impact_table(rows));
//! ```

use tabled::settings::{Alignment, Modify, Style, object::Rows};
use tabled::{Table, Tabled};

use crate::core::batch::BatchSummary;
use crate::core::preview::PreviewReport;

/// One rule's impact in the preview table.
#[derive(Tabled)]
pub struct RuleImpactRow {
    /// Rule identifier
    #[tabled(rename = "Rule")]
    pub rule: String,
    /// Search text
    #[tabled(rename = "From")]
    pub from: String,
    /// Replacement text
    #[tabled(rename = "To")]
    pub to: String,
    /// Substitutions over the analyzed sample
    #[tabled(rename = "Replacements")]
    pub replacements: String,
    /// Analyzed files touched
    #[tabled(rename = "Files")]
    pub files: String,
}

/// One statistic of the batch summary table.
#[derive(Tabled)]
pub struct SummaryRow {
    /// Statistic name
    #[tabled(rename = "Metric")]
    pub metric: String,
    /// Statistic value
    #[tabled(rename = "Value")]
    pub value: String,
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

/// Render the per-rule impact table.
pub fn create_rule_impact_table(rows: Vec<RuleImpactRow>) -> String {
    styled(Table::new(rows))
}

/// Render the batch summary as a metric/value table.
pub fn create_summary_table(summary: &BatchSummary) -> String {
    let mut rows = vec![
        SummaryRow {
            metric: "Files total".to_string(),
            value: summary.files_total.to_string(),
        },
        SummaryRow {
            metric: "Files processed".to_string(),
            value: summary.files_processed.to_string(),
        },
        SummaryRow {
            metric: "Files modified".to_string(),
            value: summary.files_modified.to_string(),
        },
        SummaryRow {
            metric: "Files skipped".to_string(),
            value: summary.files_skipped.to_string(),
        },
        SummaryRow {
            metric: "Files failed".to_string(),
            value: summary.files_failed.to_string(),
        },
        SummaryRow {
            metric: "Total replacements".to_string(),
            value: summary.total_replacements.to_string(),
        },
        SummaryRow {
            metric: "Elapsed".to_string(),
            value: format!("{:.2?}", summary.elapsed),
        },
    ];
    if summary.cancelled {
        rows.push(SummaryRow {
            metric: "Cancelled".to_string(),
            value: "yes".to_string(),
        });
    }
    styled(Table::new(rows))
}

/// Build the preview's rule impact rows.
pub fn rule_impact_rows(report: &PreviewReport) -> Vec<RuleImpactRow> {
    report
        .rule_impacts
        .iter()
        .map(|impact| RuleImpactRow {
            rule: impact.rule_id.clone(),
            from: truncate(&impact.from, 30),
            to: truncate(&impact.to, 30),
            replacements: impact.replacements.to_string(),
            files: impact.files_touched.to_string(),
        })
        .collect()
}

/// Clip long literals for table display, keeping character boundaries.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", clipped)
}
