//! # formulate-cli
//!
//! CLI library for editing form definition files and generating HTML or
//! shadcn/ui form code from them.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Form file discovery and filtering
//! - [`loader`] - Reading and writing form JSON
//! - [`edit`] - Field edits from command-line flags
//! - [`generator`] - Artifact generation using `formulate`
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for watch mode
//! - [`error`] - Error types and handling

pub mod config;
pub mod edit;
pub mod error;
pub mod generator;
pub mod loader;
pub mod scanner;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{Artifact, FormGenerator};
pub use loader::LoadedForm;
pub use scanner::{FormScanner, SourceFile};
pub use watcher::FileWatcher;
pub use writer::FileWriter;
