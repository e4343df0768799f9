//! Code generator module.
//!
//! This module defines the code generator trait and its two implementations:
//!
//! - [`HtmlEmitter`] - HTML markup plus a just-validate script (`basic`)
//! - [`ShadcnEmitter`] - React component with a Zod schema (`shadcn`)
//!
//! # Example
//!
//! ```rust
//! use formulate::generator::generate;
//! use formulate::schema::{Field, FieldType, Form};
//!
//! let form = Form::default()
//!     .with_field(Field::new("email", FieldType::Email, "Email").with_required(true));
//! let html = generate(&form);
//! assert!(html.contains("rule: \"email\""));
//! ```

mod code;
pub mod html;
pub mod shadcn;
pub mod traits;

pub use html::HtmlEmitter;
pub use shadcn::ShadcnEmitter;
pub use traits::{
    CodeGenerator, GeneratedCode, GeneratorConfig, IndentStyle, LineEnding,
    DEFAULT_VALIDATION_CDN,
};

use crate::ir;
use crate::schema::{Form, FormType};

/// Generator for a form type.
pub fn generator_for(form_type: FormType) -> &'static dyn CodeGenerator {
    match form_type {
        FormType::Basic => &HtmlEmitter,
        FormType::Shadcn => &ShadcnEmitter,
    }
}

/// Generate the artifact selected by the form's type with default settings.
pub fn generate(form: &Form) -> String {
    generate_with(form, &GeneratorConfig::default()).code
}

/// Generate the artifact selected by the form's type.
pub fn generate_with(form: &Form, config: &GeneratorConfig) -> GeneratedCode {
    let lowered = ir::lower(form);
    generator_for(form.form_type).generate(&lowered, config)
}
