//! Batch replacement run command implementation.
//!
//! Wires the full pipeline together: rule assembly and validation, target
//! discovery, an optional confirmation gate, executor construction with a
//! live progress bar, Ctrl-C as cooperative cancellation, and the final
//! summary rendering.

use std::io::Write;
use std::sync::Arc;

use crate::cli::{RunArgs, table, ui};
use crate::config::ConfigService;
use crate::core::batch::{BatchExecutor, BatchOptions};
use crate::core::discovery::FileWalker;
use crate::core::rules::RuleSet;
use crate::Result;

/// Execute a batch replacement run.
///
/// Rule validation failures and a missing root path surface before any
/// file is touched; per-file failures never abort the run and are listed
/// under the summary table instead.
pub async fn execute(args: RunArgs, config_service: &dyn ConfigService) -> Result<()> {
    let app_config = config_service.get_config()?;

    let (specs, document_settings) = args.rules.collect_specs()?;
    let options = effective_options(&args, &app_config.batch_options());
    let dry_run = options.dry_run;
    let rules = Arc::new(RuleSet::validate(specs, &options.match_defaults())?);

    let mut walker_options = args
        .target
        .resolve_walker_options(document_settings.as_ref(), &app_config);
    walker_options.stream_size_threshold_bytes = options.stream_size_threshold_bytes;
    let files = FileWalker::new(walker_options).walk(&args.root)?;
    if files.is_empty() {
        ui::print_warning("No files matched the target filters; nothing to do.");
        return Ok(());
    }

    if !args.yes && !dry_run && app_config.general.confirm_before_run {
        let question = format!(
            "Apply {} to {} under {}? [y/N] ",
            ui::count_label(rules.len(), "rule"),
            ui::count_label(files.len(), "file"),
            args.root.display()
        );
        if !confirm(&question)? {
            ui::print_warning("Aborted; no file was touched.");
            return Ok(());
        }
    }

    let progress = ui::create_progress_bar(files.len() as u64);
    let hook_bar = progress.clone();
    let executor = BatchExecutor::new(rules, options).with_progress_hook(move |event| {
        hook_bar.set_position(event.current as u64);
        if let Some(name) = event.path.file_name().and_then(|n| n.to_str()) {
            hook_bar.set_message(name.to_string());
        }
    });

    // Ctrl-C requests cooperative cancellation; in-flight files finish.
    let controller = executor.controller();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            controller.cancel();
        }
    });

    let summary = executor.run(files).await?;
    progress.finish_and_clear();

    println!("{}", table::create_summary_table(&summary));
    for error in &summary.errors {
        ui::print_error(&format!(
            "{} [{}]: {}",
            error.path.display(),
            error.kind,
            error.message
        ));
    }
    if summary.cancelled {
        ui::print_warning("Run cancelled; files already written keep their changes.");
    } else if dry_run {
        ui::print_success(&format!(
            "Dry-run complete: {} would change ({}).",
            ui::count_label(summary.files_modified, "file"),
            ui::count_label(summary.total_replacements, "replacement")
        ));
    } else {
        ui::print_success(&format!(
            "Modified {} with {} in {:.2?}.",
            ui::count_label(summary.files_modified, "file"),
            ui::count_label(summary.total_replacements, "replacement"),
            summary.elapsed
        ));
    }
    Ok(())
}

/// Layer command-line overrides over the configured batch options.
fn effective_options(args: &RunArgs, configured: &BatchOptions) -> BatchOptions {
    let mut options = configured.clone();
    if args.rules.ignore_case {
        options.case_sensitive = false;
    }
    if args.rules.whole_word {
        options.whole_word = true;
    }
    if args.dry_run {
        options.dry_run = true;
    }
    if let Some(n) = args.max_concurrency {
        options.max_concurrency = n;
    }
    if args.stop_on_error {
        options.stop_on_error = true;
    }
    if let Some(n) = args.max_errors {
        options.max_errors = n;
    }
    if let Some(ms) = args.timeout_ms {
        options.per_file_timeout_ms = ms;
    }
    options
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    std::io::stdout().flush().map_err(crate::error::SwapXError::Io)?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(crate::error::SwapXError::Io)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
