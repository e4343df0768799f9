//! Form schema model.
//!
//! This module defines the user-editable data: fields, their validation
//! settings, the form that orders them, and the palette new fields are
//! created from.

pub mod field;
pub mod form;
pub mod palette;
pub mod pattern;

pub use field::{
    ControlKind, DateRule, Field, FieldOption, FieldType, RuleFamily, ValidationRules, ValueKind,
};
pub use form::{FieldUpdate, Form, FormType};
pub use palette::{palette_item, PaletteCategory, PaletteItem, PALETTE};
pub use pattern::{compile_pattern, js_syntax_error};
