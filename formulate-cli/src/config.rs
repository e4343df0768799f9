//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `formulate.toml` files
//! and merging with command-line arguments.

use std::path::{Path, PathBuf};

use formulate::generator::DEFAULT_VALIDATION_CDN;
use formulate::{FormType, GeneratorConfig, IndentStyle, LineEnding};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliResult, ConfigError};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "formulate.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Code style of the generated artifacts.
    pub generator: GeneratorSection,

    /// Form file discovery.
    pub scan: ScanConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Rendering used for every form, overriding each form's own `type`.
    pub format: Option<FormType>,
}

/// Generated code style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub indent: IndentStyle,

    pub line_ending: LineEnding,

    /// Whether to emit a header comment naming the form.
    pub generate_docs: bool,

    /// Script URL of the just-validate bundle in basic output.
    pub validation_cdn: String,
}

/// Form file discovery configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob applied to paths relative to the scanned directory.
    pub pattern: Option<String>,

    /// Whether to respect .gitignore files.
    pub respect_gitignore: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            format: None,
        }
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            indent: IndentStyle::Spaces2,
            line_ending: LineEnding::Lf,
            generate_docs: false,
            validation_cdn: DEFAULT_VALIDATION_CDN.to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            respect_gitignore: true,
        }
    }
}

impl Config {
    /// Library generator configuration for this config.
    pub fn to_generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_indent(self.generator.indent)
            .with_line_ending(self.generator.line_ending)
            .with_generate_docs(self.generator.generate_docs)
            .with_validation_cdn(self.generator.validation_cdn.clone())
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path the default `formulate.toml` is tried and a missing
    /// file yields the default configuration. An explicitly named file must
    /// exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            debug!("No configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&config_path, &content)?;
        debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and check configuration text read from `path`.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;

        if let Some(ref pattern) = config.scan.pattern {
            glob::Pattern::new(pattern)
                .map_err(|e| ConfigError::invalid_value("scan.pattern", e.to_string()))?;
        }
        if config.generator.validation_cdn.trim().is_empty() {
            return Err(
                ConfigError::invalid_value("generator.validation_cdn", "must not be empty").into(),
            );
        }

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(format) = args.format {
            config.output.format = Some(format);
        }

        if let Some(ref filter) = args.filter {
            config.scan.pattern = Some(filter.clone());
        }

        if let Some(generate_docs) = args.generate_docs {
            config.generator.generate_docs = generate_docs;
        }

        config
    }

    /// Get default configuration.
    pub fn default_config() -> Config {
        Config::default()
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# formulate configuration file

[output]
# Output directory for generated files
dir = "./generated"

# Rendering for every form: "basic" (HTML + just-validate) or "shadcn" (React + Zod).
# When unset, each form's own "type" is used.
# format = "shadcn"

[generator]
# Indentation: "spaces2", "spaces4" or "tabs"
indent = "spaces2"

# Line endings: "lf" or "crlf"
line_ending = "lf"

# Whether to emit a header comment naming the form
generate_docs = false

# just-validate bundle loaded by basic output
validation_cdn = "https://unpkg.com/just-validate@4.3.0/dist/just-validate.production.min.js"

[scan]
# Glob filter applied to form files relative to the input directory
# pattern = "signup/**"

# Skip files ignored by .gitignore
respect_gitignore = true
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Rendering override.
    pub format: Option<FormType>,

    /// Scan filter override.
    pub filter: Option<String>,

    /// Generate docs override.
    pub generate_docs: Option<bool>,
}
