//! Preview validation.
//!
//! Evaluates the values typed into a previewed form against the same lowered
//! rules the generators emit. The first failing rule of a field determines
//! its message.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ir::{lower::lower_field, Rule, INVALID_PATTERN};
use crate::schema::{Field, Form};

/// Validation error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Id of the field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code identifying the failed rule
    pub code: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Error for a failed rule.
    pub fn from_rule(field: impl Into<String>, rule: &Rule) -> Self {
        Self::new(field, rule.message(), rule.code())
    }

    /// Error for a pattern that could not be compiled.
    pub fn invalid_pattern(field: impl Into<String>) -> Self {
        Self::new(field, INVALID_PATTERN, "invalid_pattern")
    }
}

/// Result of a simulated submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether every field passed
    pub valid: bool,
    /// One error per failing field, in form order
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Create a validation result from a list of errors.
    /// If the list is empty, the result is valid.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            trace!("Validation passed (no errors)");
        } else {
            let field_names: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            debug!(
                error_count = errors.len(),
                fields = ?field_names,
                "Validation failed"
            );
        }
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Error reported for a field, if any.
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// Validator for previewed values.
#[derive(Debug, Clone, Copy)]
pub struct PreviewValidator {
    today: NaiveDate,
}

impl Default for PreviewValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewValidator {
    /// Validator using the local calendar date as "today".
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Validator with a fixed "today".
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Check one field's current value.
    pub fn validate_field(&self, field: &Field, value: &str) -> Option<FieldError> {
        let mut diagnostics = Vec::new();
        let lowered = lower_field(field, &mut diagnostics);
        let broken_pattern =
            !value.is_empty() && diagnostics.iter().any(|d| d.message == INVALID_PATTERN);

        let error = match lowered.first_failure(value, self.today) {
            // An uncompilable pattern sits just before the email check.
            Some(Rule::Email) | None if broken_pattern => {
                Some(FieldError::invalid_pattern(&field.id))
            }
            Some(rule) => Some(FieldError::from_rule(&field.id, rule)),
            None => None,
        };

        trace!(
            field = %field.id,
            passed = error.is_none(),
            "Validated field"
        );
        error
    }

    /// Message for a field's current value; empty when it passes.
    pub fn validate_message(&self, field: &Field, value: &str) -> String {
        self.validate_field(field, value)
            .map(|e| e.message)
            .unwrap_or_default()
    }

    /// Simulate a submission. Missing values are treated as empty.
    pub fn validate_form(&self, form: &Form, values: &HashMap<String, String>) -> ValidationResult {
        let errors = form
            .fields
            .iter()
            .filter_map(|field| {
                let value = values.get(&field.id).map(String::as_str).unwrap_or("");
                self.validate_field(field, value)
            })
            .collect();
        ValidationResult::from_errors(errors)
    }
}

/// Check one field's value with today's date.
pub fn validate_field(field: &Field, value: &str) -> String {
    PreviewValidator::new().validate_message(field, value)
}

/// Simulate a submission with today's date.
pub fn validate_form(form: &Form, values: &HashMap<String, String>) -> ValidationResult {
    PreviewValidator::new().validate_form(form, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DateRule, FieldType, ValidationRules};

    fn validator() -> PreviewValidator {
        PreviewValidator::with_today(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn text(validation: ValidationRules) -> Field {
        Field::new("t", FieldType::Text, "T").with_validation(validation)
    }

    fn date(rule: DateRule) -> Field {
        Field::new("d", FieldType::Date, "D")
            .with_validation(ValidationRules::new().with_date_rule(rule))
    }

    #[test]
    fn test_required() {
        let field = Field::new("name", FieldType::Text, "Name").with_required(true);
        let v = validator();
        assert_eq!(v.validate_message(&field, ""), "This field is required");
        assert_eq!(v.validate_message(&field, "Ada"), "");

        let error = v.validate_field(&field, "").unwrap();
        assert_eq!(error.field, "name");
        assert_eq!(error.code, "required");
    }

    #[test]
    fn test_empty_optional_value_passes_everything() {
        let field = text(ValidationRules::new().with_min_length(5).with_pattern("^x$"));
        assert_eq!(validator().validate_message(&field, ""), "");
    }

    #[test]
    fn test_length_before_pattern() {
        let field = text(
            ValidationRules::new()
                .with_min_length(3)
                .with_max_length(5)
                .with_pattern("^[a-z]+$"),
        );
        let v = validator();
        assert_eq!(v.validate_message(&field, "A"), "Minimum length is 3");
        assert_eq!(v.validate_message(&field, "abcdefg"), "Maximum length is 5");
        assert_eq!(v.validate_message(&field, "ABC"), "Invalid format");
        assert_eq!(v.validate_message(&field, "abc"), "");
    }

    #[test]
    fn test_invalid_pattern_message() {
        let field = text(ValidationRules::new().with_min_length(2).with_pattern("[a-"));
        let v = validator();
        assert_eq!(v.validate_message(&field, "a"), "Minimum length is 2");
        assert_eq!(v.validate_message(&field, "abc"), "Invalid validation pattern");
        assert_eq!(v.validate_message(&field, ""), "");
    }

    #[test]
    fn test_number_checks() {
        let field = Field::new("n", FieldType::Number, "N")
            .with_validation(ValidationRules::new().with_min(1.0).with_max(10.0));
        let v = validator();
        assert_eq!(v.validate_message(&field, "abc"), "Please enter a valid number");
        assert_eq!(v.validate_message(&field, "0"), "Minimum value is 1");
        assert_eq!(v.validate_message(&field, "11"), "Maximum value is 10");
        assert_eq!(v.validate_message(&field, "5"), "");
    }

    #[test]
    fn test_email_checked_last() {
        let field = Field::new("e", FieldType::Email, "E").with_validation(
            ValidationRules::new().with_min_length(8),
        );
        let v = validator();
        assert_eq!(v.validate_message(&field, "a@b"), "Minimum length is 8");
        assert_eq!(v.validate_message(&field, "abcdefgh"), "Invalid email address");
        assert_eq!(v.validate_message(&field, "ada@example.com"), "");
    }

    #[test]
    fn test_date_rules() {
        let v = validator();
        assert_eq!(
            v.validate_message(&date(DateRule::FutureDate), "not-a-date"),
            "Please enter a valid date"
        );
        assert_eq!(
            v.validate_message(&date(DateRule::FutureDate), "2025-06-15"),
            "Date must be in the future"
        );
        assert_eq!(
            v.validate_message(&date(DateRule::PastDate), "2025-06-16"),
            "Date must be in the past"
        );
        assert_eq!(
            v.validate_message(&date(DateRule::BusinessDay), "2025-06-14"),
            "Date must be a business day (Mon-Fri)"
        );
        let range = date(DateRule::range(
            NaiveDate::from_ymd_opt(2025, 1, 1),
            NaiveDate::from_ymd_opt(2025, 12, 31),
        ));
        assert_eq!(
            v.validate_message(&range, "2024-12-31"),
            "Date must be on or after 2025-01-01"
        );
        assert_eq!(
            v.validate_message(&range, "2026-01-01"),
            "Date must be on or before 2025-12-31"
        );
        assert_eq!(v.validate_message(&range, "2025-07-01"), "");
    }

    #[test]
    fn test_min_age() {
        let field = date(DateRule::min_age(18));
        let v = validator();
        assert_eq!(
            v.validate_message(&field, "2007-06-16"),
            "You must be at least 18 years old"
        );
        assert_eq!(v.validate_message(&field, "2007-06-15"), "");
    }

    #[test]
    fn test_boolean_false_is_empty() {
        let field = Field::new("tos", FieldType::Checkbox, "Terms").with_required(true);
        let v = validator();
        assert_eq!(v.validate_message(&field, "false"), "This field is required");
        assert_eq!(v.validate_message(&field, "true"), "");
    }

    #[test]
    fn test_validate_form_collects_errors_in_order() {
        let form = Form::default()
            .with_field(Field::new("name", FieldType::Text, "Name").with_required(true))
            .with_field(Field::new("email", FieldType::Email, "Email").with_required(true))
            .with_field(Field::new("bio", FieldType::Textarea, "Bio"));
        let mut values = HashMap::new();
        values.insert("email".to_string(), "nope".to_string());

        let result = validator().validate_form(&form, &values);
        assert!(!result.is_valid());
        let fields: Vec<_> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
        assert_eq!(
            result.error_for("email").unwrap().message,
            "Invalid email address"
        );

        values.insert("name".to_string(), "Ada".to_string());
        values.insert("email".to_string(), "ada@example.com".to_string());
        assert!(validator().validate_form(&form, &values).is_valid());
    }
}
