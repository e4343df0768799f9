//! Form file scanner.
//!
//! Discovers `*.form.json` definitions below a directory, respecting
//! `.gitignore` patterns and an optional glob filter. A path naming a single
//! file is returned as is.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::error::{CliError, CliResult, FormFileError, ScanError};

/// Suffix identifying form definition files.
pub const FORM_FILE_SUFFIX: &str = ".form.json";

/// Whether a path names a form definition file.
pub fn is_form_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > FORM_FILE_SUFFIX.len() && name.ends_with(FORM_FILE_SUFFIX))
}

/// A discovered form file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// File content.
    pub content: String,
}

/// Scanner for discovering form definition files.
#[derive(Debug)]
pub struct FormScanner {
    /// Directory to scan, or a single form file.
    root: PathBuf,

    /// Whether to respect .gitignore files.
    respect_gitignore: bool,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,
}

impl FormScanner {
    /// Create a new scanner for the given directory or file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: true,
            filter: None,
        }
    }

    /// Set whether to respect .gitignore files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set a glob filter pattern for files.
    ///
    /// Only files whose path relative to the root matches are included.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Scan and return all discovered form files, sorted by path.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        if self.root.is_file() {
            let relative = self
                .root
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| self.root.clone());
            return Ok(vec![read_source(&self.root, relative)?]);
        }

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .hidden(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() || !is_form_file(path) {
                continue;
            }

            let relative = self.relative_path(path);
            if let Some(ref pattern) = self.filter {
                if !pattern.matches_path(&relative) {
                    trace!(path = %relative.display(), "Filtered out");
                    continue;
                }
            }

            files.push(read_source(path, relative)?);
        }

        if files.is_empty() {
            return Err(ScanError::no_form_files(self.root.clone()).into());
        }

        // Walk order depends on the file system.
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        debug!(root = %self.root.display(), count = files.len(), "Scanned form files");
        Ok(files)
    }

    /// Scan without failing on empty results.
    ///
    /// Returns an empty vector if no files are found.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(CliError::Scan(ScanError::NoFormFiles { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Get the relative path from root.
    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn read_source(path: &Path, relative_path: PathBuf) -> CliResult<SourceFile> {
    let content = std::fs::read_to_string(path).map_err(|e| FormFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        relative_path,
        content,
    })
}
