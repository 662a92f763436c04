//! Read-only preview command implementation.
//!
//! Discovers the target files, runs the preview engine over a bounded
//! sample, and renders the overview, per-rule impact, change samples,
//! risk assessment, and recommendations. Never writes anything.

use std::sync::Arc;

use colored::Colorize;

use crate::cli::{PreviewArgs, table, ui};
use crate::config::ConfigService;
use crate::core::discovery::FileWalker;
use crate::core::preview::{PreviewEngine, PreviewOptions, RiskLevel};
use crate::core::rules::{MatchDefaults, RuleSet};
use crate::Result;

/// Execute the preview and print the report.
pub async fn execute(args: PreviewArgs, config_service: &dyn ConfigService) -> Result<()> {
    let app_config = config_service.get_config()?;

    let (specs, document_settings) = args.rules.collect_specs()?;
    let defaults = MatchDefaults {
        case_sensitive: app_config.engine.case_sensitive && !args.rules.ignore_case,
        whole_word: app_config.engine.whole_word || args.rules.whole_word,
    };
    let rules = Arc::new(RuleSet::validate(specs, &defaults)?);

    let walker_options = args
        .target
        .resolve_walker_options(document_settings.as_ref(), &app_config);
    let files = FileWalker::new(walker_options).walk(&args.root)?;
    if files.is_empty() {
        ui::print_warning("No files matched the target filters; nothing to preview.");
        return Ok(());
    }

    let options = PreviewOptions {
        max_files: args.files,
        samples_per_file: args.samples,
        context_lines: args.context,
        stream_size_threshold_bytes: app_config.engine.stream_size_threshold_bytes,
        oversize_limit_bytes: app_config.engine.oversize_limit_bytes,
    };
    let report = PreviewEngine::new(rules, options).preview(&files).await?;

    let overview = &report.overview;
    println!(
        "Analyzed {} of {}; {} would change with {}.",
        ui::count_label(overview.files_analyzed, "file"),
        ui::count_label(overview.files_total, "candidate"),
        overview.files_with_changes,
        ui::count_label(overview.total_replacements, "replacement")
    );
    println!(
        "Estimated full-run duration: {:.2?} ({}).",
        overview.estimated_duration,
        ui::count_label(overview.rules_active, "active rule")
    );
    println!();
    println!("{}", table::create_rule_impact_table(table::rule_impact_rows(&report)));

    for preview in report.file_previews.iter().filter(|p| p.would_modify) {
        println!();
        println!(
            "{} ({})",
            preview.path.display().to_string().bold(),
            ui::count_label(preview.replacements, "replacement")
        );
        for sample in &preview.samples {
            println!(
                "  line {}: {} -> {}",
                sample.line,
                sample.from.as_str().red(),
                sample.to.as_str().green()
            );
            for context_line in &sample.context {
                println!("    {}", context_line.dimmed());
            }
        }
    }

    println!();
    let level_label = match report.risk.level {
        RiskLevel::Low => "low".green().bold(),
        RiskLevel::Medium => "medium".yellow().bold(),
        RiskLevel::High => "high".red().bold(),
    };
    println!("Risk: {} (score {})", level_label, report.risk.score);
    for factor in &report.risk.factors {
        println!("  [{}] {}", factor.code, factor.detail);
    }
    for recommendation in &report.recommendations {
        ui::print_warning(recommendation);
    }
    Ok(())
}
