//! Form schema and its editing operations.
//!
//! A [`Form`] is an explicitly owned value. Fields are appended at the tail,
//! changed one attribute at a time, removed by index, and reordered by a
//! remove-then-insert move. Nothing here touches storage.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::field::{DateRule, Field, FieldOption};
use super::palette::PaletteItem;
use super::pattern::compile_pattern;
use crate::error::{SchemaError, SchemaResult};

/// Which artifact the generator produces for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    /// HTML markup plus a just-validate script.
    #[default]
    Basic,
    /// React component with a Zod schema, using shadcn/ui.
    #[serde(alias = "component")]
    Shadcn,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Basic => "basic",
            FormType::Shadcn => "shadcn",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" | "html" => Ok(FormType::Basic),
            "shadcn" | "component" => Ok(FormType::Shadcn),
            other => Err(format!(
                "unknown form type '{}', expected basic or shadcn",
                other
            )),
        }
    }
}

/// Form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub name: String,
    /// Emission order of the generated artifacts.
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(rename = "type", default)]
    pub form_type: FormType,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "New Form".to_string(),
            fields: Vec::new(),
            form_type: FormType::Basic,
        }
    }
}

/// A single-attribute change applied by [`Form::update_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Label(String),
    /// `None` or an empty string clears the placeholder.
    Placeholder(Option<String>),
    Required(bool),
    AddOption(FieldOption),
    SetOptionLabel { index: usize, label: String },
    SetOptionValue { index: usize, value: String },
    RemoveOption(usize),
    MinLength(Option<usize>),
    MaxLength(Option<usize>),
    Min(Option<f64>),
    Max(Option<f64>),
    /// Checked against JavaScript regex syntax and compiled before it is
    /// accepted; `None` or empty clears it.
    Pattern(Option<String>),
    /// Replaces the active date rule together with all of its parameters.
    DateRule(Option<DateRule>),
    /// Parameter of the `minAge` rule. A value selects `minAge`; clearing it
    /// leaves any other active rule alone.
    AgeValue(Option<u32>),
    /// Parameter of the `dateRange` rule. A value selects `dateRange`;
    /// clearing it leaves any other active rule alone.
    MinDate(Option<NaiveDate>),
    /// Same as [`FieldUpdate::MinDate`] for the upper bound.
    MaxDate(Option<NaiveDate>),
}

impl Form {
    /// Create an empty form.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the artifact type.
    pub fn with_form_type(mut self, form_type: FormType) -> Self {
        self.form_type = form_type;
        self
    }

    /// Append fields while building a form; ids are not checked.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn set_form_type(&mut self, form_type: FormType) {
        self.form_type = form_type;
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Index of the field with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Append a field at the tail.
    pub fn append_field(&mut self, field: Field) -> SchemaResult<()> {
        if self.position(&field.id).is_some() {
            return Err(SchemaError::DuplicateFieldId { id: field.id });
        }
        debug!(field = %field.id, field_type = %field.field_type, "Appending field");
        self.fields.push(field);
        Ok(())
    }

    /// Build a field from a palette template and append it.
    ///
    /// The timestamp is bumped until the derived id is unused.
    pub fn add_from_palette(&mut self, item: &PaletteItem, timestamp_ms: i64) -> &Field {
        let mut stamp = timestamp_ms;
        let mut field = item.build(stamp);
        while self.position(&field.id).is_some() {
            stamp += 1;
            field = item.build(stamp);
        }
        debug!(field = %field.id, "Adding field from palette");
        self.fields.push(field);
        &self.fields[self.fields.len() - 1]
    }

    /// Replace the field at `index` with a copy that differs in one attribute.
    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> SchemaResult<()> {
        let len = self.fields.len();
        let current = self
            .fields
            .get(index)
            .ok_or(SchemaError::field_index(index, len))?;
        let updated = apply_update(current.clone(), update)?;
        trace!(field = %updated.id, index, "Updated field");
        self.fields[index] = updated;
        Ok(())
    }

    /// Remove and return the field at `index`.
    pub fn remove_field(&mut self, index: usize) -> SchemaResult<Field> {
        if index >= self.fields.len() {
            return Err(SchemaError::field_index(index, self.fields.len()));
        }
        let removed = self.fields.remove(index);
        debug!(field = %removed.id, index, "Removed field");
        Ok(removed)
    }

    /// Move the field at `source` to `destination`.
    ///
    /// A drop without a destination leaves the form unchanged.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> SchemaResult<()> {
        let Some(destination) = destination else {
            trace!(source, "Drop without destination ignored");
            return Ok(());
        };
        let len = self.fields.len();
        if source >= len {
            return Err(SchemaError::field_index(source, len));
        }
        if destination >= len {
            return Err(SchemaError::field_index(destination, len));
        }
        let field = self.fields.remove(source);
        self.fields.insert(destination, field);
        debug!(source, destination, "Reordered field");
        Ok(())
    }
}

fn apply_update(mut field: Field, update: FieldUpdate) -> SchemaResult<Field> {
    match update {
        FieldUpdate::Label(label) => field.label = label,
        FieldUpdate::Placeholder(placeholder) => {
            field.placeholder = placeholder.filter(|p| !p.is_empty())
        }
        FieldUpdate::Required(required) => field.required = required,
        FieldUpdate::AddOption(option) => field.options.push(option),
        FieldUpdate::SetOptionLabel { index, label } => {
            option_mut(&mut field, index)?.label = label
        }
        FieldUpdate::SetOptionValue { index, value } => {
            option_mut(&mut field, index)?.value = value
        }
        FieldUpdate::RemoveOption(index) => {
            option_mut(&mut field, index)?;
            field.options.remove(index);
        }
        FieldUpdate::MinLength(n) => field.validation_mut().min_length = n,
        FieldUpdate::MaxLength(n) => field.validation_mut().max_length = n,
        FieldUpdate::Min(n) => field.validation_mut().min = n,
        FieldUpdate::Max(n) => field.validation_mut().max = n,
        FieldUpdate::Pattern(pattern) => {
            let pattern = pattern.filter(|p| !p.is_empty());
            if let Some(source) = &pattern {
                compile_pattern(source)?;
            }
            field.validation_mut().pattern = pattern;
        }
        FieldUpdate::DateRule(rule) => field.validation_mut().date = rule,
        FieldUpdate::AgeValue(years) => {
            let rules = field.validation_mut();
            let active = matches!(rules.date, Some(DateRule::MinAge { .. }));
            if active || years.is_some() {
                rules.date = Some(DateRule::MinAge { age_value: years });
            }
        }
        FieldUpdate::MinDate(date) => {
            let rules = field.validation_mut();
            match (active_range(&rules.date), date) {
                (Some((_, max_date)), _) => rules.date = Some(DateRule::range(date, max_date)),
                (None, Some(_)) => rules.date = Some(DateRule::range(date, None)),
                (None, None) => {}
            }
        }
        FieldUpdate::MaxDate(date) => {
            let rules = field.validation_mut();
            match (active_range(&rules.date), date) {
                (Some((min_date, _)), _) => rules.date = Some(DateRule::range(min_date, date)),
                (None, Some(_)) => rules.date = Some(DateRule::range(None, date)),
                (None, None) => {}
            }
        }
    }
    field.prune_validation();
    Ok(field)
}

/// Bounds of the active date range, if the active rule is one.
fn active_range(rule: &Option<DateRule>) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
    match rule {
        Some(DateRule::DateRange { min_date, max_date }) => Some((*min_date, *max_date)),
        _ => None,
    }
}

fn option_mut(field: &mut Field, index: usize) -> SchemaResult<&mut FieldOption> {
    let len = field.options.len();
    let id = field.id.clone();
    field
        .options
        .get_mut(index)
        .ok_or(SchemaError::OptionIndexOutOfBounds {
            field: id,
            index,
            len,
        })
}
