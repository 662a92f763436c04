//! Terminal status output shared by the subcommands.
//!
//! Status lines use lowercase word markers rather than symbols so they
//! stay readable when piped through tools that strip color. Problems and
//! cautions go to stderr; only results land on stdout.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a result line for a completed action.
pub fn print_success(message: &str) {
    println!("{} {}", "done".green().bold(), message);
}

/// Print a non-fatal problem to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

/// Print a cautionary note to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Progress bar for a batch run: bar, position, percentage, and the file
/// most recently reported by the executor.
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{prefix:.cyan.bold} {wide_bar} {pos}/{len} {percent:>3}% {msg:.dim}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    ProgressBar::new(total)
        .with_style(style)
        .with_prefix("replacing")
}

/// `1 file` / `3 files` for status lines.
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
