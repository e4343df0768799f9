//! Code generator trait definition.
//!
//! This module defines the `CodeGenerator` trait that both renderings
//! implement, together with the configuration they share.

use serde::{Deserialize, Serialize};

use crate::ir::{Diagnostic, FormIR};

/// Default just-validate script URL.
pub const DEFAULT_VALIDATION_CDN: &str =
    "https://unpkg.com/just-validate@4.3.0/dist/just-validate.production.min.js";

/// Trait for form code generators.
///
/// Each generator is a pure mapping from a lowered form to source text.
/// Generation is total: anything that cannot be emitted was already dropped
/// during lowering and shows up in [`FormIR::diagnostics`].
pub trait CodeGenerator: Send + Sync {
    /// Short lowercase identifier ("basic", "shadcn").
    fn id(&self) -> &'static str;

    /// Human-readable name of this generator.
    fn name(&self) -> &'static str;

    /// File extension for generated files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Generate source text for the form.
    fn generate(&self, form: &FormIR, config: &GeneratorConfig) -> GeneratedCode;
}

/// Generator configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Whether to start the artifact with a comment naming the form
    pub generate_docs: bool,

    /// URL the basic rendering loads just-validate from
    pub validation_cdn: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            generate_docs: false,
            validation_cdn: DEFAULT_VALIDATION_CDN.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set whether to generate a header comment.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    /// Set the just-validate script URL.
    pub fn with_validation_cdn(mut self, url: impl Into<String>) -> Self {
        self.validation_cdn = url.into();
        self
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Two spaces per level
    #[default]
    Spaces2,

    /// Four spaces per level
    Spaces4,

    /// One tab per level
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string for one level.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Generated code output.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    /// The generated source text
    pub code: String,

    /// Extension of the file the code belongs in
    pub file_extension: &'static str,

    /// Settings dropped while lowering the form
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedCode {
    /// Create a new GeneratedCode instance.
    pub fn new(code: impl Into<String>, file_extension: &'static str) -> Self {
        Self {
            code: code.into(),
            file_extension,
            diagnostics: Vec::new(),
        }
    }

    /// Attach lowering diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Check if anything was dropped during generation.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
