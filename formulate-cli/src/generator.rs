//! Artifact generation for loaded forms.
//!
//! Drives the `formulate` generators with the configured code style and
//! decides where each artifact lands.

use std::path::PathBuf;

use formulate::{generate_with, Form, GeneratedCode, GeneratorConfig};
use tracing::{debug, warn};

use crate::config::Config;
use crate::loader::LoadedForm;

/// One generated file.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Form definition the artifact was generated from.
    pub source: PathBuf,

    /// Where the artifact is written.
    pub output_path: PathBuf,

    pub generated: GeneratedCode,
}

/// Generator for form artifacts.
pub struct FormGenerator {
    config: Config,
    generator_config: GeneratorConfig,
}

impl FormGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        let generator_config = config.to_generator_config();
        Self {
            config,
            generator_config,
        }
    }

    /// Generate code for one form, applying the configured format override.
    pub fn generate_form(&self, form: &Form) -> GeneratedCode {
        match self.config.output.format {
            Some(format) if format != form.form_type => {
                let form = form.clone().with_form_type(format);
                generate_with(&form, &self.generator_config)
            }
            _ => generate_with(form, &self.generator_config),
        }
    }

    /// Generate artifacts for every loaded form.
    ///
    /// Artifacts mirror the directory layout below the scan root:
    /// `forms/admin/users.form.json` becomes `{dir}/admin/users.{ext}`.
    pub fn generate(&self, forms: &[LoadedForm]) -> Vec<Artifact> {
        forms
            .iter()
            .map(|loaded| {
                let generated = self.generate_form(&loaded.form);
                for diagnostic in &generated.diagnostics {
                    warn!(form = %loaded.path.display(), "{}", diagnostic);
                }

                let mut output_path = self.config.output.dir.clone();
                if let Some(parent) = loaded.relative_path.parent() {
                    output_path.push(parent);
                }
                output_path.push(format!("{}.{}", loaded.stem(), generated.file_extension));

                debug!(
                    source = %loaded.path.display(),
                    output = %output_path.display(),
                    "Generated artifact"
                );
                Artifact {
                    source: loaded.path.clone(),
                    output_path,
                    generated,
                }
            })
            .collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
