//! File writer for generated artifacts.
//!
//! Writes generated HTML / TSX to disk with dry-run support. Files whose
//! content would not change are left untouched so watch mode does not keep
//! bumping modification times.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CliResult, WriteError};
use crate::generator::Artifact;

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written.
    Written {
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// File already had this content.
    Unchanged { path: PathBuf },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        path: PathBuf,
    },
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write content to a file.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
            debug!(path = %path.display(), "Artifact unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Write a generated artifact to its output path.
    pub fn write_artifact(&self, artifact: &Artifact) -> CliResult<WriteResult> {
        self.write(&artifact.output_path, &artifact.generated.code)
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the file was written.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 unless written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}
