//! SwapX library root.
//!
//! The crate is split into the replacement engine (`core`), the layered
//! application configuration (`config`), and the CLI surface (`cli` and
//! `commands`). The engine is usable as a library: validate a rule set,
//! discover target files, then preview or execute a batch.
//!
//! ```rust,no_run
//! use swapx_cli::core::batch::{BatchExecutor, BatchOptions};
//! use swapx_cli::core::discovery::{FileWalker, WalkerOptions};
//! use swapx_cli::core::rules::{MatchDefaults, RuleSet, RuleSpec};
//! use std::sync::Arc;
//!
//! # async fn demo() -> swapx_cli::Result<()> {
//! let rules = RuleSet::validate(
//!     vec![RuleSpec::new("TODO", "DONE")],
//!     &MatchDefaults::default(),
//! )?;
//! let options = BatchOptions::default();
//! let files = FileWalker::new(WalkerOptions::from_batch(&options)).walk("./src".as_ref())?;
//! let executor = BatchExecutor::new(Arc::new(rules), options);
//! let summary = executor.run(files).await?;
//! println!("{} replacements", summary.total_replacements);
//! # Ok(())
//! # }
//! ```

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub type Result<T> = error::SwapXResult<T>;
