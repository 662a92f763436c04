//! Target file discovery.
//!
//! This module provides [`FileWalker`] to enumerate files under a root
//! directory with extension include filters and glob exclude patterns,
//! yielding [`FileDescriptor`] records in a stable order.
//!
//! # Examples
//!
//! ```rust,ignore
//! use swapx_cli::core::discovery::{FileWalker, WalkerOptions};
//! let walker = FileWalker::new(WalkerOptions::default());
//! let files = walker.walk("./src".as_ref()).unwrap();
//! ```

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::core::batch::BatchOptions;
use crate::{Result, error::SwapXError};

/// Descriptor of one discovered target file.
///
/// Created by the walker, consumed by the batch executor, and discarded
/// after the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes at discovery time.
    pub size: u64,
    /// Whether the streaming I/O strategy applies (size at or above the
    /// streaming threshold).
    pub streaming: bool,
}

/// Filters and thresholds applied during discovery.
#[derive(Debug, Clone)]
pub struct WalkerOptions {
    /// Extensions to include, compared case-insensitively and without the
    /// leading dot. Empty means every file qualifies.
    pub include_extensions: Vec<String>,
    /// Glob patterns excluded from discovery, matched against the
    /// `/`-normalized path relative to the walk root. Excludes dominate
    /// includes.
    pub exclude_patterns: Vec<String>,
    /// Size at or above which a file is flagged for streaming I/O.
    pub stream_size_threshold_bytes: u64,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            stream_size_threshold_bytes: BatchOptions::DEFAULT_STREAM_SIZE_THRESHOLD,
        }
    }
}

impl WalkerOptions {
    /// Derive walker options from batch options (thresholds only; filters
    /// stay empty).
    pub fn from_batch(options: &BatchOptions) -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            stream_size_threshold_bytes: options.stream_size_threshold_bytes,
        }
    }
}

/// Recursive file walker with include/exclude filters.
pub struct FileWalker {
    options: WalkerOptions,
    extensions: Vec<String>,
}

impl FileWalker {
    /// Create a walker; extension filters are normalized to lowercase
    /// without a leading dot.
    pub fn new(options: WalkerOptions) -> Self {
        let extensions = options
            .include_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            options,
            extensions,
        }
    }

    /// Enumerate matching files under `root` in lexicographic full-path
    /// order.
    ///
    /// Symlinks to directories are not followed (cycle avoidance);
    /// symlinked regular files are included. Entries that cannot be read
    /// are logged as warnings and skipped; traversal continues.
    ///
    /// # Errors
    ///
    /// - [`SwapXError::PathNotFound`] when `root` does not exist.
    /// - [`SwapXError::Config`] when an exclude pattern is malformed.
    pub fn walk(&self, root: &Path) -> Result<Vec<FileDescriptor>> {
        if !root.exists() {
            return Err(SwapXError::PathNotFound(root.to_path_buf()));
        }
        let excludes = build_glob_set(&self.options.exclude_patterns)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            // file_type targets the symlink itself, so a symlinked file
            // shows up as a symlink; resolve through metadata below.
            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            let metadata = match std::fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            if !self.extension_included(path) {
                continue;
            }
            if let Some(relative) = relative_unix_path(path, root) {
                if excludes.is_match(relative.as_str()) {
                    log::debug!("excluded by pattern: {}", relative);
                    continue;
                }
            }
            files.push(FileDescriptor {
                path: path.to_path_buf(),
                size: metadata.len(),
                streaming: metadata.len() >= self.options.stream_size_threshold_bytes,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn extension_included(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .is_some_and(|e| self.extensions.contains(&e))
    }
}

/// Compute the `/`-normalized path of `path` relative to `root`.
fn relative_unix_path(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
