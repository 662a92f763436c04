use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use swapx_cli::core::discovery::FileDescriptor;

/// Test workspace generator
#[allow(dead_code)]
pub struct TestTreeGenerator {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestTreeGenerator {
    /// Create a new temporary directory as test workspace
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a text file with the given relative path and content
    pub fn create_text_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a binary file (NUL bytes in the sniffing prefix)
    pub fn create_binary_file(&self, relative: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"\x00\x01\x02binary payload").unwrap();
        path
    }

    /// Create a batch of numbered text files with identical content
    pub fn create_numbered_files(&self, count: usize, content: &str) -> Vec<PathBuf> {
        (0..count)
            .map(|i| self.create_text_file(&format!("file_{:03}.txt", i), content))
            .collect()
    }

    /// Create a JSON rule document
    pub fn create_rule_document(&self, name: &str, json: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, json).unwrap();
        path
    }

    /// Build a file descriptor the way discovery would
    pub fn descriptor(&self, path: &Path) -> FileDescriptor {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        FileDescriptor {
            path: path.to_path_buf(),
            size,
            streaming: false,
        }
    }

    /// Descriptors for a list of paths
    pub fn descriptors(&self, paths: &[PathBuf]) -> Vec<FileDescriptor> {
        paths.iter().map(|p| self.descriptor(p)).collect()
    }
}
