//! Intermediate Representation (IR) for form generation.
//!
//! The IR sits between the editable schema and the renderers. Lowering
//! resolves which settings apply to each field type and turns them into an
//! ordered list of [`Rule`]s, so the preview validator and both generators
//! see exactly the same constraints in exactly the same order.

pub mod lower;
pub mod rule;

use chrono::NaiveDate;

use crate::schema::{FieldOption, FieldType, FormType};

pub use lower::{lower, INVALID_PATTERN};
pub use rule::{age_on, date_helpers, parse_date, Pattern, Rule, DATE_FORMAT, MIN_DATE_YEAR};

/// Lowered field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIR {
    pub id: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub field_type: FieldType,
    pub options: Vec<FieldOption>,
    /// Constraints in check order.
    pub rules: Vec<Rule>,
}

impl FieldIR {
    /// Whether any date rule needs the generated date helpers.
    pub fn has_date_rules(&self) -> bool {
        self.rules.iter().any(Rule::is_date_rule)
    }

    /// First rule the value fails, if any.
    ///
    /// Empty values only ever fail `Required`. For boolean controls the
    /// submitted `"false"` counts as empty.
    pub fn first_failure(&self, value: &str, today: NaiveDate) -> Option<&Rule> {
        let empty = value.is_empty()
            || (self.field_type.value_kind().is_boolean() && value == "false");
        if empty {
            return self.rules.iter().find(|r| **r == Rule::Required);
        }
        self.rules
            .iter()
            .filter(|r| **r != Rule::Required)
            .find(|r| !r.is_satisfied_by(value, today))
    }
}

/// A non-fatal note produced while lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Id of the field the note is about.
    pub field: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Lowered form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormIR {
    pub id: String,
    pub name: String,
    pub form_type: FormType,
    pub fields: Vec<FieldIR>,
    /// Settings that were dropped during lowering.
    pub diagnostics: Vec<Diagnostic>,
}

impl FormIR {
    /// Lowered field by id.
    pub fn field(&self, id: &str) -> Option<&FieldIR> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether any field needs the generated date helpers.
    pub fn has_date_rules(&self) -> bool {
        self.fields.iter().any(FieldIR::has_date_rules)
    }
}
