//! Field schema definitions.
//!
//! A [`Field`] describes one form control. Its [`FieldType`] is a closed
//! enumeration that also acts as the per-type strategy table: every renderer
//! and the validator ask the type for its control, its value kind and the
//! rule families it accepts instead of branching on the type themselves.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ir::parse_date;

/// Field type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Password,
    Select,
    Checkbox,
    Radio,
    Textarea,
    Switch,
    Date,
}

/// Markup control used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// `<input>` with the given `type` attribute.
    Input(&'static str),
    /// Multi-line text.
    TextArea,
    /// Drop-down with one entry per option.
    Select,
    /// One radio button per option.
    RadioGroup,
    /// Single checkbox.
    Checkbox,
    /// Checkbox presented as an on/off switch.
    Switch,
}

/// Kind of value a field produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Date,
    /// One of the field's options.
    Choice,
    Boolean,
}

impl ValueKind {
    /// Whether the field submits a checked state rather than text.
    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueKind::Boolean)
    }
}

/// Families of validation rules a field type may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    /// `minLength` / `maxLength`
    Length,
    /// `pattern`
    Pattern,
    /// `min` / `max`
    Numeric,
    /// `dateType` and its parameters
    Date,
}

impl FieldType {
    /// All field types in palette order.
    pub const ALL: [FieldType; 10] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Password,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Switch,
        FieldType::Number,
        FieldType::Date,
    ];

    /// Serialized name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Textarea => "textarea",
            FieldType::Switch => "switch",
            FieldType::Date => "date",
        }
    }

    /// Capitalized name used in editor headings ("Email Field").
    pub fn title(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Control used to render this type.
    pub fn control(&self) -> ControlKind {
        match self {
            FieldType::Text => ControlKind::Input("text"),
            FieldType::Number => ControlKind::Input("number"),
            FieldType::Email => ControlKind::Input("email"),
            FieldType::Password => ControlKind::Input("password"),
            FieldType::Date => ControlKind::Input("date"),
            FieldType::Textarea => ControlKind::TextArea,
            FieldType::Select => ControlKind::Select,
            FieldType::Radio => ControlKind::RadioGroup,
            FieldType::Checkbox => ControlKind::Checkbox,
            FieldType::Switch => ControlKind::Switch,
        }
    }

    /// Kind of value this type produces.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            FieldType::Text | FieldType::Email | FieldType::Password | FieldType::Textarea => {
                ValueKind::Text
            }
            FieldType::Number => ValueKind::Number,
            FieldType::Date => ValueKind::Date,
            FieldType::Select | FieldType::Radio => ValueKind::Choice,
            FieldType::Checkbox | FieldType::Switch => ValueKind::Boolean,
        }
    }

    /// Whether rules of the given family apply to this type.
    pub fn supports(&self, family: RuleFamily) -> bool {
        match family {
            RuleFamily::Length | RuleFamily::Pattern => self.value_kind() == ValueKind::Text,
            RuleFamily::Numeric => *self == FieldType::Number,
            RuleFamily::Date => *self == FieldType::Date,
        }
    }

    /// Email fields always carry the email format rule.
    pub fn implies_email(&self) -> bool {
        *self == FieldType::Email
    }

    /// Whether the type renders one control per option.
    pub fn uses_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = FieldType::ALL.iter().map(|t| t.as_str()).collect();
                format!("unknown field type '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// One selectable entry of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Date-specific validation. At most one is active per field; each variant
/// owns its parameters so switching variants drops the old ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dateType", rename_all = "camelCase")]
pub enum DateRule {
    /// Date of birth must be at least `age_value` years ago.
    #[serde(rename_all = "camelCase")]
    MinAge {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        age_value: Option<u32>,
    },

    /// Date must fall inside the inclusive range.
    #[serde(rename_all = "camelCase")]
    DateRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_date: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_date: Option<NaiveDate>,
    },

    /// Date must be after today.
    FutureDate,

    /// Date must be before today.
    PastDate,

    /// Date must fall on Monday to Friday.
    BusinessDay,
}

impl DateRule {
    /// Minimum age rule.
    pub fn min_age(years: u32) -> Self {
        DateRule::MinAge {
            age_value: Some(years),
        }
    }

    /// Inclusive date range rule.
    pub fn range(min_date: Option<NaiveDate>, max_date: Option<NaiveDate>) -> Self {
        DateRule::DateRange { min_date, max_date }
    }

    /// Serialized `dateType` name.
    pub fn kind(&self) -> &'static str {
        match self {
            DateRule::MinAge { .. } => "minAge",
            DateRule::DateRange { .. } => "dateRange",
            DateRule::FutureDate => "futureDate",
            DateRule::PastDate => "pastDate",
            DateRule::BusinessDay => "businessDay",
        }
    }
}

impl FromStr for DateRule {
    type Err = String;

    /// Parse a bare `dateType` name; parameters start unset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minAge" => Ok(DateRule::MinAge { age_value: None }),
            "dateRange" => Ok(DateRule::range(None, None)),
            "futureDate" => Ok(DateRule::FutureDate),
            "pastDate" => Ok(DateRule::PastDate),
            "businessDay" => Ok(DateRule::BusinessDay),
            other => Err(format!(
                "unknown date type '{}', expected minAge, dateRange, futureDate, pastDate or businessDay",
                other
            )),
        }
    }
}

/// Validation settings attached to a field.
///
/// Which settings take effect depends on the field type, see
/// [`FieldType::supports`]. Date settings are read through
/// [`RawValidationRules`] so a malformed `dateType` or parameter fails the
/// load instead of silently dropping the rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawValidationRules")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateRule>,
}

/// Validation settings as they appear in form JSON.
///
/// Date parameters are plain strings here; an empty date counts as unset,
/// matching a cleared date input in the builder.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidationRules {
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    date_type: Option<String>,
    #[serde(default)]
    age_value: Option<u32>,
    #[serde(default)]
    min_date: Option<String>,
    #[serde(default)]
    max_date: Option<String>,
}

impl TryFrom<RawValidationRules> for ValidationRules {
    type Error = String;

    fn try_from(raw: RawValidationRules) -> Result<Self, Self::Error> {
        let date = match raw.date_type.as_deref() {
            None => None,
            Some(kind) => Some(match kind.parse::<DateRule>()? {
                DateRule::MinAge { .. } => DateRule::MinAge {
                    age_value: raw.age_value,
                },
                DateRule::DateRange { .. } => DateRule::range(
                    date_setting("minDate", raw.min_date.as_deref())?,
                    date_setting("maxDate", raw.max_date.as_deref())?,
                ),
                rule => rule,
            }),
        };
        Ok(Self {
            min_length: raw.min_length,
            max_length: raw.max_length,
            min: raw.min,
            max: raw.max,
            pattern: raw.pattern,
            date,
        })
    }
}

fn date_setting(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| format!("{} '{}' is not a YYYY-MM-DD date", name, text)),
    }
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn with_max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn with_min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    pub fn with_max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_date_rule(mut self, rule: DateRule) -> Self {
        self.date = Some(rule);
        self
    }

    /// True when no setting is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique within a form; used as DOM id, control name and schema key.
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl Field {
    /// Create a field with no placeholder, options or validation.
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: Vec::new(),
            validation: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(label, value));
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Validation settings, creating an empty set if absent.
    pub fn validation_mut(&mut self) -> &mut ValidationRules {
        self.validation.get_or_insert_with(ValidationRules::default)
    }

    /// Drop the validation object once every setting has been cleared.
    pub(crate) fn prune_validation(&mut self) {
        if self.validation.as_ref().is_some_and(ValidationRules::is_empty) {
            self.validation = None;
        }
    }
}
