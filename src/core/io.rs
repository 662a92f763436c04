//! Size-aware file reading and writing.
//!
//! Reads enforce two guards before any content reaches the processor: an
//! oversize cap (files at or above it are skipped without reading) and a
//! binary sniff over the first KiB (a NUL byte there, or invalid UTF-8
//! anywhere, classifies the file as likely-binary). Files at or above the
//! streaming threshold move through fixed 64 KiB chunks instead of
//! one-shot calls; matching still sees the full text, so matches can
//! never fall between chunks.
//!
//! Writes go to a sibling temporary file that is renamed into place on
//! success. An interrupted write leaves the original file untouched.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::core::batch::{BatchOptions, SkipReason};
use crate::core::discovery::FileDescriptor;
use crate::{Result, error::SwapXError};

/// Fixed chunk size for streaming reads and writes.
const CHUNK_SIZE: usize = 64 * 1024;

/// Bytes sniffed for binary classification.
const SNIFF_LEN: usize = 1024;

/// Result of reading a file under the skip policy.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Decoded UTF-8 content.
    Text(String),
    /// The file must not be processed; the reason says why.
    Skipped(SkipReason),
}

/// File reader/writer with the size-threshold policy baked in.
#[derive(Debug, Clone)]
pub struct FileIo {
    stream_size_threshold_bytes: u64,
    oversize_limit_bytes: u64,
}

impl FileIo {
    /// Create with explicit thresholds.
    pub fn new(stream_size_threshold_bytes: u64, oversize_limit_bytes: u64) -> Self {
        Self {
            stream_size_threshold_bytes,
            oversize_limit_bytes,
        }
    }

    /// Create from batch options.
    pub fn from_options(options: &BatchOptions) -> Self {
        Self::new(
            options.stream_size_threshold_bytes,
            options.oversize_limit_bytes,
        )
    }

    /// Read a file's content as UTF-8 text, or classify it as skipped.
    ///
    /// Oversized files are never opened. Likely-binary files are not read
    /// past the sniffing prefix when the prefix already disqualifies them.
    pub async fn read(&self, descriptor: &FileDescriptor) -> Result<ReadOutcome> {
        let path = descriptor.path.as_path();
        if descriptor.size >= self.oversize_limit_bytes {
            return Ok(ReadOutcome::Skipped(SkipReason::Oversize));
        }

        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(|source| SwapXError::read_failure(path, source))?;

        let mut bytes = Vec::with_capacity(usize::try_from(descriptor.size).unwrap_or(0));
        let mut sniff = [0u8; SNIFF_LEN];
        let mut sniffed = 0usize;
        while sniffed < SNIFF_LEN {
            let n = file
                .read(&mut sniff[sniffed..])
                .await
                .map_err(|source| SwapXError::read_failure(path, source))?;
            if n == 0 {
                break;
            }
            sniffed += n;
        }
        if sniff[..sniffed].contains(&0) {
            return Ok(ReadOutcome::Skipped(SkipReason::LikelyBinary));
        }
        bytes.extend_from_slice(&sniff[..sniffed]);

        if descriptor.size >= self.stream_size_threshold_bytes {
            let mut chunk = vec![0u8; CHUNK_SIZE];
            loop {
                let n = file
                    .read(&mut chunk)
                    .await
                    .map_err(|source| SwapXError::read_failure(path, source))?;
                if n == 0 {
                    break;
                }
                bytes.extend_from_slice(&chunk[..n]);
            }
        } else {
            file.read_to_end(&mut bytes)
                .await
                .map_err(|source| SwapXError::read_failure(path, source))?;
        }

        match String::from_utf8(bytes) {
            Ok(text) => Ok(ReadOutcome::Text(text)),
            Err(_) => {
                log::debug!("invalid UTF-8, treating as binary: {}", path.display());
                Ok(ReadOutcome::Skipped(SkipReason::LikelyBinary))
            }
        }
    }

    /// Write `content` to the descriptor's path atomically.
    ///
    /// The content lands in a sibling temporary file first and is renamed
    /// over the original only after a successful flush.
    pub async fn write(&self, descriptor: &FileDescriptor, content: &str) -> Result<()> {
        let path = descriptor.path.as_path();
        let temp = sibling_temp_path(path);

        let write_result = self.write_temp(&temp, content).await;
        if let Err(err) = write_result {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err);
        }

        if let Err(source) = tokio::fs::rename(&temp, path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(SwapXError::write_failure(path, source));
        }
        Ok(())
    }

    async fn write_temp(&self, temp: &Path, content: &str) -> Result<()> {
        let mut file = tokio::fs::File::create(temp)
            .await
            .map_err(|source| SwapXError::write_failure(temp, source))?;

        if content.len() as u64 >= self.stream_size_threshold_bytes {
            for chunk in content.as_bytes().chunks(CHUNK_SIZE) {
                file.write_all(chunk)
                    .await
                    .map_err(|source| SwapXError::write_failure(temp, source))?;
            }
        } else {
            file.write_all(content.as_bytes())
                .await
                .map_err(|source| SwapXError::write_failure(temp, source))?;
        }
        file.flush()
            .await
            .map_err(|source| SwapXError::write_failure(temp, source))?;
        file.sync_all()
            .await
            .map_err(|source| SwapXError::write_failure(temp, source))?;
        Ok(())
    }
}

/// Temporary path next to `path`, unique per process.
fn sibling_temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("swapx");
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
