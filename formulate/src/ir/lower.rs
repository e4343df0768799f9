//! Lowering from the editable schema to the rule IR.

use tracing::{debug, trace, warn};

use super::rule::{Pattern, Rule};
use super::{Diagnostic, FieldIR, FormIR};
use crate::schema::{compile_pattern, DateRule, Field, Form, RuleFamily, ValidationRules};

/// Diagnostic recorded for a pattern that does not compile.
pub const INVALID_PATTERN: &str = "Invalid validation pattern";

/// Lower a form into its IR.
///
/// Never fails: settings that cannot be emitted are dropped and recorded in
/// [`FormIR::diagnostics`].
pub fn lower(form: &Form) -> FormIR {
    let mut diagnostics = Vec::new();
    let fields = form
        .fields
        .iter()
        .map(|field| lower_field(field, &mut diagnostics))
        .collect();

    debug!(
        form = %form.id,
        diagnostics = diagnostics.len(),
        "Lowered form"
    );

    FormIR {
        id: form.id.clone(),
        name: form.name.clone(),
        form_type: form.form_type,
        fields,
        diagnostics,
    }
}

pub(crate) fn lower_field(field: &Field, diagnostics: &mut Vec<Diagnostic>) -> FieldIR {
    let mut lowering = FieldLowering {
        field,
        rules: Vec::new(),
        diagnostics,
    };
    lowering.run();
    let rules = lowering.rules;

    trace!(field = %field.id, rules = rules.len(), "Lowered field");

    FieldIR {
        id: field.id.clone(),
        label: field.label.clone(),
        placeholder: field.placeholder.clone(),
        required: field.required,
        field_type: field.field_type,
        options: field.options.clone(),
        rules,
    }
}

struct FieldLowering<'a> {
    field: &'a Field,
    rules: Vec<Rule>,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl FieldLowering<'_> {
    fn run(&mut self) {
        let field = self.field;
        let empty = ValidationRules::default();
        let validation = field.validation.as_ref().unwrap_or(&empty);
        let ty = field.field_type;

        if field.required {
            self.rules.push(Rule::Required);
        }

        // Length
        if self.accepts(
            RuleFamily::Length,
            validation.min_length.is_some() || validation.max_length.is_some(),
            "minLength/maxLength",
        ) {
            if let Some(n) = validation.min_length.filter(|n| *n > 0) {
                self.rules.push(Rule::MinLength(n));
            }
            if let Some(n) = validation.max_length.filter(|n| *n > 0) {
                self.rules.push(Rule::MaxLength(n));
            }
        }

        // Numbers
        if ty.supports(RuleFamily::Numeric) {
            self.rules.push(Rule::Number);
        }
        if self.accepts(
            RuleFamily::Numeric,
            validation.min.is_some() || validation.max.is_some(),
            "min/max",
        ) {
            if let Some(min) = self.finite(validation.min, "min") {
                self.rules.push(Rule::Min(min));
            }
            if let Some(max) = self.finite(validation.max, "max") {
                self.rules.push(Rule::Max(max));
            }
        }

        // Pattern
        if let Some(source) = validation.pattern.as_deref().filter(|p| !p.is_empty()) {
            if self.accepts(RuleFamily::Pattern, true, "pattern") {
                match compile_pattern(source) {
                    Ok(regex) => self.rules.push(Rule::Pattern(Pattern::new(source, regex))),
                    Err(err) => {
                        warn!(field = %field.id, error = %err, "Dropping invalid pattern");
                        self.note(INVALID_PATTERN);
                    }
                }
            }
        }

        // Dates
        if ty.supports(RuleFamily::Date) {
            self.rules.push(Rule::ValidDate);
        }
        if self.accepts(RuleFamily::Date, validation.date.is_some(), "dateType") {
            if let Some(rule) = &validation.date {
                self.lower_date_rule(rule);
            }
        }

        if ty.implies_email() {
            self.rules.push(Rule::Email);
        }
    }

    fn lower_date_rule(&mut self, rule: &DateRule) {
        match rule {
            DateRule::MinAge {
                age_value: Some(years),
            } => self.rules.push(Rule::MinAge(*years)),
            DateRule::MinAge { age_value: None } => {
                self.note("minAge has no ageValue; rule dropped")
            }
            DateRule::DateRange {
                min_date: None,
                max_date: None,
            } => self.note("dateRange has no minDate or maxDate; rule dropped"),
            DateRule::DateRange { min_date, max_date } => {
                if let Some(date) = min_date {
                    self.rules.push(Rule::MinDate(*date));
                }
                if let Some(date) = max_date {
                    self.rules.push(Rule::MaxDate(*date));
                }
            }
            DateRule::FutureDate => self.rules.push(Rule::FutureDate),
            DateRule::PastDate => self.rules.push(Rule::PastDate),
            DateRule::BusinessDay => self.rules.push(Rule::BusinessDay),
        }
    }

    /// True when the family applies; records a note when `present` settings
    /// would be dropped.
    fn accepts(&mut self, family: RuleFamily, present: bool, setting: &str) -> bool {
        if self.field.field_type.supports(family) {
            return true;
        }
        if present {
            self.note(format!(
                "{} is not supported by {} fields; rule dropped",
                setting, self.field.field_type
            ));
        }
        false
    }

    fn finite(&mut self, bound: Option<f64>, name: &str) -> Option<f64> {
        match bound {
            Some(n) if n.is_finite() => Some(n),
            Some(_) => {
                self.note(format!("{} is not a finite number; rule dropped", name));
                None
            }
            None => None,
        }
    }

    fn note(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(self.field.id.clone(), message);
        trace!(%diagnostic, "Lowering diagnostic");
        self.diagnostics.push(diagnostic);
    }
}
