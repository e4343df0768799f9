//! Error types for the CLI.
//!
//! This module defines all error types used throughout the CLI,
//! providing detailed error messages with the offending path or key.

use std::path::PathBuf;

use formulate::SchemaError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during form file discovery.
    #[error("Failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    /// Error reading or writing a form definition.
    #[error("Failed to load form: {0}")]
    Form(#[from] FormFileError),

    /// A form edit was rejected.
    #[error("Failed to edit form: {0}")]
    Edit(#[from] SchemaError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// A check did not pass (stale artifact, rejected preview values).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Command-line value that clap could not check on its own.
    #[error("Invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during form file discovery.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Input path does not exist.
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// No form definitions found in directory.
    #[error("No *.form.json files found in: {path}")]
    NoFormFiles { path: PathBuf },

    /// Invalid filter pattern.
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Error from ignore crate walker.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error reading or writing a form definition file.
#[derive(Debug, Error)]
pub enum FormFileError {
    /// Failed to read the file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid form definition.
    #[error("Invalid form JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// Form could not be serialized back to JSON.
    #[error("Failed to serialize form for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    /// Target already exists and overwriting was not requested.
    #[error("Form file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax or value types.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),

    /// Error from notify crate.
    #[error("Watch notification error: {0}")]
    Notify(String),
}

impl CliError {
    /// Create an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ScanError {
    /// Create a path not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::PathNotFound { path }
    }

    /// Create a no form files error.
    pub fn no_form_files(path: PathBuf) -> Self {
        Self::NoFormFiles { path }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl FormFileError {
    /// Create an invalid JSON error.
    pub fn invalid_json(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            path,
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err: CliError = ScanError::no_form_files(PathBuf::from("forms")).into();
        assert_eq!(
            err.to_string(),
            "Failed to scan directory: No *.form.json files found in: forms"
        );

        let err: CliError =
            FormFileError::invalid_json(PathBuf::from("a.form.json"), "expected value").into();
        assert!(err.to_string().contains("a.form.json"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_schema_errors_convert() {
        let err: CliError = SchemaError::field_index(3, 1).into();
        assert!(matches!(err, CliError::Edit(_)));
        assert!(err.to_string().starts_with("Failed to edit form:"));
    }

    #[test]
    fn test_config_value_error() {
        let err = ConfigError::invalid_value("scan.pattern", "unclosed bracket");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'scan.pattern': unclosed bracket"
        );
    }
}
