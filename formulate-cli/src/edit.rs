//! Field edits from command-line flags.
//!
//! `formulate set` accepts several attribute flags at once; each becomes one
//! [`FieldUpdate`] applied in a fixed order: clears first, then the plain
//! attributes, then the date rule followed by its parameters.

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use formulate::{DateRule, FieldOption, FieldUpdate};

/// Attribute that `--clear` resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearTarget {
    Placeholder,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    DateRule,
}

impl ClearTarget {
    fn update(self) -> FieldUpdate {
        match self {
            ClearTarget::Placeholder => FieldUpdate::Placeholder(None),
            ClearTarget::MinLength => FieldUpdate::MinLength(None),
            ClearTarget::MaxLength => FieldUpdate::MaxLength(None),
            ClearTarget::Min => FieldUpdate::Min(None),
            ClearTarget::Max => FieldUpdate::Max(None),
            ClearTarget::Pattern => FieldUpdate::Pattern(None),
            ClearTarget::DateRule => FieldUpdate::DateRule(None),
        }
    }
}

/// Attribute flags of `formulate set`.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldEdits {
    /// New label
    #[arg(long)]
    pub label: Option<String>,

    /// New placeholder (an empty string clears it)
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Whether a value is required
    #[arg(long)]
    pub required: Option<bool>,

    /// Append an option, given as LABEL=VALUE
    #[arg(long = "add-option", value_name = "LABEL=VALUE", value_parser = parse_option)]
    pub add_options: Vec<FieldOption>,

    /// Remove the option at this index
    #[arg(long, value_name = "INDEX")]
    pub remove_option: Option<usize>,

    /// Minimum length (0 clears it)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Maximum length (0 clears it)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Minimum numeric value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Maximum numeric value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Regular expression the value must match
    #[arg(long)]
    pub pattern: Option<String>,

    /// Date rule: minAge, dateRange, futureDate, pastDate or businessDay
    #[arg(long, value_parser = parse_date_rule)]
    pub date_rule: Option<DateRule>,

    /// Minimum age in years for the minAge rule
    #[arg(long)]
    pub age: Option<u32>,

    /// Earliest date (YYYY-MM-DD) for the dateRange rule
    #[arg(long, value_parser = parse_day)]
    pub min_date: Option<NaiveDate>,

    /// Latest date (YYYY-MM-DD) for the dateRange rule
    #[arg(long, value_parser = parse_day)]
    pub max_date: Option<NaiveDate>,

    /// Reset an attribute
    #[arg(long, value_enum)]
    pub clear: Vec<ClearTarget>,
}

impl FieldEdits {
    /// Updates in application order.
    pub fn into_updates(self) -> Vec<FieldUpdate> {
        let mut updates: Vec<FieldUpdate> =
            self.clear.iter().map(|target| target.update()).collect();

        if let Some(label) = self.label {
            updates.push(FieldUpdate::Label(label));
        }
        if let Some(placeholder) = self.placeholder {
            updates.push(FieldUpdate::Placeholder(Some(placeholder)));
        }
        if let Some(required) = self.required {
            updates.push(FieldUpdate::Required(required));
        }
        if let Some(index) = self.remove_option {
            updates.push(FieldUpdate::RemoveOption(index));
        }
        updates.extend(self.add_options.into_iter().map(FieldUpdate::AddOption));
        if let Some(n) = self.min_length {
            updates.push(FieldUpdate::MinLength(Some(n)));
        }
        if let Some(n) = self.max_length {
            updates.push(FieldUpdate::MaxLength(Some(n)));
        }
        if let Some(n) = self.min {
            updates.push(FieldUpdate::Min(Some(n)));
        }
        if let Some(n) = self.max {
            updates.push(FieldUpdate::Max(Some(n)));
        }
        if let Some(pattern) = self.pattern {
            updates.push(FieldUpdate::Pattern(Some(pattern)));
        }
        if let Some(rule) = self.date_rule {
            updates.push(FieldUpdate::DateRule(Some(rule)));
        }
        if let Some(age) = self.age {
            updates.push(FieldUpdate::AgeValue(Some(age)));
        }
        if let Some(date) = self.min_date {
            updates.push(FieldUpdate::MinDate(Some(date)));
        }
        if let Some(date) = self.max_date {
            updates.push(FieldUpdate::MaxDate(Some(date)));
        }

        updates
    }
}

/// Split `KEY=VALUE`; the value may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn parse_option(s: &str) -> Result<FieldOption, String> {
    let (label, value) = parse_assignment(s)?;
    Ok(FieldOption::new(label, value))
}

fn parse_date_rule(s: &str) -> Result<DateRule, String> {
    s.parse()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    formulate::ir::parse_date(s).ok_or_else(|| {
        format!(
            "invalid date '{}': expected YYYY-MM-DD with a year of at least {}",
            s,
            formulate::ir::MIN_DATE_YEAR
        )
    })
}
