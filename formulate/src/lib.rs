//! # formulate
//!
//! Form schema model, preview validation and code generation for form
//! builders.
//!
//! A form is an ordered list of typed fields with optional validation
//! settings. `formulate` edits that schema, checks values against it the way
//! a live preview would, and renders it as either plain HTML with a
//! [just-validate](https://just-validate.dev/) script or a React component
//! built on [shadcn/ui](https://ui.shadcn.com/) and [Zod](https://zod.dev/).
//!
//! ## Quick Start
//!
//! ```rust
//! use formulate::{generate, palette_item, FieldType, FieldUpdate, Form, FormType};
//!
//! let mut form = Form::default();
//! form.add_from_palette(&palette_item(FieldType::Email), 1_700_000_000_000);
//! form.update_field(0, FieldUpdate::Required(true)).unwrap();
//!
//! let html = generate(&form);
//! assert!(html.contains("validator.addField(\"#email-1700000000000\""));
//!
//! form.set_form_type(FormType::Shadcn);
//! let tsx = generate(&form);
//! assert!(tsx.contains(".email(\"Invalid email address\")"));
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Edit | [`schema`] | [`Form`] |
//! | Lower | [`ir`] | [`ir::FormIR`] with ordered [`ir::Rule`]s per field |
//! | Render | [`generator`] | HTML (`basic`) or TSX (`shadcn`) |
//! | Preview | [`validator`] | first failing rule's message per field |
//!
//! The preview validator and both renderers read the same lowered rules, so
//! a value rejected in the preview is rejected by the generated code with the
//! same message.
//!
//! ## Field Types
//!
//! | Type | Control | Rules |
//! |------|---------|-------|
//! | `text`, `password`, `textarea` | text input / multi-line | length, pattern |
//! | `email` | email input | length, pattern, email format |
//! | `number` | number input | number, min, max |
//! | `date` | date input | valid date, one date rule |
//! | `select`, `radio` | drop-down / radio group | required only |
//! | `checkbox`, `switch` | checkbox / switch | required only |

pub mod error;
pub mod escape;
pub mod generator;
pub mod ir;
pub mod schema;
pub mod validator;

// Re-export main types for convenience
pub use error::{SchemaError, SchemaResult};
pub use generator::{
    generate, generate_with, CodeGenerator, GeneratedCode, GeneratorConfig, HtmlEmitter,
    IndentStyle, LineEnding, ShadcnEmitter,
};
pub use schema::{
    palette_item, DateRule, Field, FieldOption, FieldType, FieldUpdate, Form, FormType,
    PaletteItem, ValidationRules, PALETTE,
};
pub use validator::{validate_field, validate_form, FieldError, PreviewValidator, ValidationResult};
