//! Validation rule IR.
//!
//! [`Rule`] is the single rule table shared by the preview validator and both
//! renderers. For every rule kind it defines the error code, the user-facing
//! message, the native check, and (for date rules) the JavaScript predicate
//! embedded in generated code.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

use crate::escape;

/// Date input format shared by the preview and the generated `parseDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest year a date value may carry.
pub const MIN_DATE_YEAR: i32 = 100;

/// A compiled, user-supplied pattern.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(source: impl Into<String>, regex: fancy_regex::Regex) -> Self {
        Self {
            source: source.into(),
            regex,
        }
    }

    /// Pattern source as written by the user.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Values that exhaust the backtracking limit count as not matching.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value).unwrap_or(false)
    }

    /// JavaScript regex literal for this pattern.
    pub fn js_literal(&self) -> String {
        escape::js_regex_literal(&self.source)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// One validation constraint of a lowered field.
///
/// Rules of a field are kept in check order: the first rule a value fails
/// determines the message shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    // ==========================================================================
    // Presence
    // ==========================================================================
    /// Value must be non-empty (checked for boolean controls).
    Required,

    // ==========================================================================
    // Text
    // ==========================================================================
    /// Minimum length in characters.
    MinLength(usize),

    /// Maximum length in characters.
    MaxLength(usize),

    /// Value must match the pattern somewhere.
    Pattern(Pattern),

    /// Value must look like `local@domain.tld`.
    Email,

    // ==========================================================================
    // Numbers
    // ==========================================================================
    /// Value must parse as a finite number.
    Number,

    /// Inclusive lower bound.
    Min(f64),

    /// Inclusive upper bound.
    Max(f64),

    // ==========================================================================
    // Dates
    // ==========================================================================
    /// Value must parse as a `YYYY-MM-DD` calendar date.
    ValidDate,

    /// Age in whole years on today's date must be at least this.
    MinAge(u32),

    /// Date must be on or after this day.
    MinDate(NaiveDate),

    /// Date must be on or before this day.
    MaxDate(NaiveDate),

    /// Date must be strictly after today.
    FutureDate,

    /// Date must be strictly before today.
    PastDate,

    /// Date must not fall on Saturday or Sunday.
    BusinessDay,
}

impl Rule {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::MinLength(_) => "min_length",
            Rule::MaxLength(_) => "max_length",
            Rule::Pattern(_) => "pattern",
            Rule::Email => "email",
            Rule::Number => "number",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::ValidDate => "date",
            Rule::MinAge(_) => "min_age",
            Rule::MinDate(_) => "min_date",
            Rule::MaxDate(_) => "max_date",
            Rule::FutureDate => "future_date",
            Rule::PastDate => "past_date",
            Rule::BusinessDay => "business_day",
        }
    }

    /// Message shown when a value fails this rule.
    pub fn message(&self) -> String {
        match self {
            Rule::Required => "This field is required".to_string(),
            Rule::MinLength(n) => format!("Minimum length is {}", n),
            Rule::MaxLength(n) => format!("Maximum length is {}", n),
            Rule::Pattern(_) => "Invalid format".to_string(),
            Rule::Email => "Invalid email address".to_string(),
            Rule::Number => "Please enter a valid number".to_string(),
            Rule::Min(n) => format!("Minimum value is {}", n),
            Rule::Max(n) => format!("Maximum value is {}", n),
            Rule::ValidDate => "Please enter a valid date".to_string(),
            Rule::MinAge(years) => format!("You must be at least {} years old", years),
            Rule::MinDate(date) => format!("Date must be on or after {}", date.format(DATE_FORMAT)),
            Rule::MaxDate(date) => {
                format!("Date must be on or before {}", date.format(DATE_FORMAT))
            }
            Rule::FutureDate => "Date must be in the future".to_string(),
            Rule::PastDate => "Date must be in the past".to_string(),
            Rule::BusinessDay => "Date must be a business day (Mon-Fri)".to_string(),
        }
    }

    /// Whether this is one of the date rules.
    pub fn is_date_rule(&self) -> bool {
        matches!(
            self,
            Rule::ValidDate
                | Rule::MinAge(_)
                | Rule::MinDate(_)
                | Rule::MaxDate(_)
                | Rule::FutureDate
                | Rule::PastDate
                | Rule::BusinessDay
        )
    }

    /// Check a non-empty value against this rule.
    ///
    /// Type checks (`Number`, `ValidDate`) own the parse failure; every other
    /// rule passes values it cannot interpret so only one message is reported.
    pub fn is_satisfied_by(&self, value: &str, today: NaiveDate) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::MinLength(n) => value.chars().count() >= *n,
            Rule::MaxLength(n) => value.chars().count() <= *n,
            Rule::Pattern(pattern) => pattern.is_match(value),
            Rule::Email => email_regex().is_match(value),
            Rule::Number => parse_number(value).is_some(),
            Rule::Min(min) => parse_number(value).map_or(true, |n| n >= *min),
            Rule::Max(max) => parse_number(value).map_or(true, |n| n <= *max),
            Rule::ValidDate => parse_date(value).is_some(),
            Rule::MinAge(years) => {
                parse_date(value).map_or(true, |birth| age_on(birth, today) >= i64::from(*years))
            }
            Rule::MinDate(min) => parse_date(value).map_or(true, |d| d >= *min),
            Rule::MaxDate(max) => parse_date(value).map_or(true, |d| d <= *max),
            Rule::FutureDate => parse_date(value).map_or(true, |d| d > today),
            Rule::PastDate => parse_date(value).map_or(true, |d| d < today),
            Rule::BusinessDay => parse_date(value).map_or(true, |d| !is_weekend(d)),
        }
    }

    /// JavaScript predicate `(value) => boolean` for rules without a native
    /// combinator in the target libraries. Uses the helpers from
    /// [`date_helpers`]. Empty values pass; presence is `Required`'s job.
    pub fn js_predicate(&self) -> Option<String> {
        self.js_condition()
            .map(|condition| format!("(value) => !value || {}", condition))
    }

    /// Boolean JavaScript expression over `value` checked by
    /// [`Rule::js_predicate`].
    pub fn js_condition(&self) -> Option<String> {
        let condition = match self {
            Rule::ValidDate => "!Number.isNaN(parseDate(value).getTime())".to_string(),
            Rule::MinAge(years) => format!("calculateAge(parseDate(value)) >= {}", years),
            Rule::MinDate(date) => format!(
                "parseDate(value) >= parseDate({})",
                escape::js_quoted(&date.format(DATE_FORMAT).to_string())
            ),
            Rule::MaxDate(date) => format!(
                "parseDate(value) <= parseDate({})",
                escape::js_quoted(&date.format(DATE_FORMAT).to_string())
            ),
            Rule::FutureDate => "parseDate(value) > startOfToday()".to_string(),
            Rule::PastDate => "parseDate(value) < startOfToday()".to_string(),
            Rule::BusinessDay => "![0, 6].includes(parseDate(value).getDay())".to_string(),
            _ => return None,
        };
        Some(condition)
    }
}

/// Helper functions referenced by [`Rule::js_predicate`], one line each.
///
/// With `typed` set the helpers carry TypeScript annotations.
pub fn date_helpers(typed: bool) -> Vec<String> {
    let (value_param, date_param, ret_date, ret_number) = if typed {
        ("value: string", "birthDate: Date", ": Date", ": number")
    } else {
        ("value", "birthDate", "", "")
    };
    vec![
        format!("function parseDate({}){} {{", value_param, ret_date),
        "  const [year, month, day] = String(value).split(\"-\").map(Number);".to_string(),
        "  const date = new Date(year, month - 1, day);".to_string(),
        "  const matches = date.getFullYear() === year && date.getMonth() === month - 1 && date.getDate() === day;".to_string(),
        "  return matches ? date : new Date(NaN);".to_string(),
        "}".to_string(),
        String::new(),
        format!("function startOfToday(){} {{", ret_date),
        "  const today = new Date();".to_string(),
        "  today.setHours(0, 0, 0, 0);".to_string(),
        "  return today;".to_string(),
        "}".to_string(),
        String::new(),
        format!("function calculateAge({}){} {{", date_param, ret_number),
        "  const today = new Date();".to_string(),
        "  let age = today.getFullYear() - birthDate.getFullYear();".to_string(),
        "  const monthDiff = today.getMonth() - birthDate.getMonth();".to_string(),
        "  if (monthDiff < 0 || (monthDiff === 0 && today.getDate() < birthDate.getDate())) {"
            .to_string(),
        "    age--;".to_string(),
        "  }".to_string(),
        "  return age;".to_string(),
        "}".to_string(),
    ]
}

/// Parse a `YYYY-MM-DD` date.
///
/// Years below 100 are rejected: the generated `parseDate` builds dates with
/// `new Date(year, ...)`, which maps them onto 1900-1999.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= MIN_DATE_YEAR)
}

/// Whole years between `birth` and `today`, by calendar-year subtraction
/// corrected when the birthday has not yet come this year.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2025, 6, 15)
    }

    #[test]
    fn test_age_on_corrects_for_birthday() {
        assert_eq!(age_on(day(2007, 6, 15), today()), 18);
        assert_eq!(age_on(day(2007, 6, 16), today()), 17);
        assert_eq!(age_on(day(2007, 7, 1), today()), 17);
        assert_eq!(age_on(day(2007, 1, 1), today()), 18);
    }

    #[test]
    fn test_min_age_boundary() {
        let rule = Rule::MinAge(18);
        assert!(rule.is_satisfied_by("2007-06-15", today()));
        assert!(!rule.is_satisfied_by("2007-06-16", today()));
    }

    #[test]
    fn test_future_and_past_exclude_today() {
        assert!(!Rule::FutureDate.is_satisfied_by("2025-06-15", today()));
        assert!(Rule::FutureDate.is_satisfied_by("2025-06-16", today()));
        assert!(!Rule::PastDate.is_satisfied_by("2025-06-15", today()));
        assert!(Rule::PastDate.is_satisfied_by("2025-06-14", today()));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let min = Rule::MinDate(day(2025, 1, 1));
        let max = Rule::MaxDate(day(2025, 12, 31));
        assert!(min.is_satisfied_by("2025-01-01", today()));
        assert!(!min.is_satisfied_by("2024-12-31", today()));
        assert!(max.is_satisfied_by("2025-12-31", today()));
        assert!(!max.is_satisfied_by("2026-01-01", today()));
    }

    #[test]
    fn test_business_day_rejects_weekends() {
        // 2025-06-14 is a Saturday, 2025-06-15 a Sunday.
        assert!(!Rule::BusinessDay.is_satisfied_by("2025-06-14", today()));
        assert!(!Rule::BusinessDay.is_satisfied_by("2025-06-15", today()));
        assert!(Rule::BusinessDay.is_satisfied_by("2025-06-16", today()));
    }

    #[test]
    fn test_valid_date_rejects_impossible_dates() {
        assert!(Rule::ValidDate.is_satisfied_by("2024-02-29", today()));
        assert!(!Rule::ValidDate.is_satisfied_by("2023-02-29", today()));
        assert!(!Rule::ValidDate.is_satisfied_by("tomorrow", today()));
    }

    #[test]
    fn test_two_digit_years_are_invalid() {
        assert_eq!(parse_date("0050-01-01"), None);
        assert!(!Rule::ValidDate.is_satisfied_by("0050-01-01", today()));
        assert_eq!(parse_date("0100-01-01"), Some(day(100, 1, 1)));
    }

    #[test]
    fn test_number_rules() {
        assert!(Rule::Number.is_satisfied_by("4.5", today()));
        assert!(!Rule::Number.is_satisfied_by("four", today()));
        assert!(Rule::Min(5.0).is_satisfied_by("5", today()));
        assert!(!Rule::Min(5.0).is_satisfied_by("4.99", today()));
        assert!(Rule::Min(5.0).is_satisfied_by("four", today()));
        assert!(!Rule::Max(10.0).is_satisfied_by("11", today()));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(Rule::MaxLength(3).is_satisfied_by("äöü", today()));
        assert!(!Rule::MinLength(4).is_satisfied_by("äöü", today()));
    }

    #[test]
    fn test_email_format() {
        assert!(Rule::Email.is_satisfied_by("a@b.co", today()));
        assert!(!Rule::Email.is_satisfied_by("a@b", today()));
        assert!(!Rule::Email.is_satisfied_by("plainaddress", today()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(Rule::MinLength(3).message(), "Minimum length is 3");
        assert_eq!(Rule::Min(2.5).message(), "Minimum value is 2.5");
        assert_eq!(Rule::Max(10.0).message(), "Maximum value is 10");
        assert_eq!(
            Rule::MinDate(day(2024, 1, 1)).message(),
            "Date must be on or after 2024-01-01"
        );
        assert_eq!(
            Rule::MinAge(18).message(),
            "You must be at least 18 years old"
        );
    }

    #[test]
    fn test_js_predicates_only_for_date_rules() {
        assert_eq!(
            Rule::MinAge(21).js_predicate().as_deref(),
            Some("(value) => !value || calculateAge(parseDate(value)) >= 21")
        );
        assert_eq!(
            Rule::MaxDate(day(2030, 1, 2)).js_condition().as_deref(),
            Some("parseDate(value) <= parseDate(\"2030-01-02\")")
        );
        assert!(Rule::Email.js_predicate().is_none());
        assert!(Rule::Required.js_predicate().is_none());
    }

    #[test]
    fn test_typed_helpers() {
        let typed = date_helpers(true).join("\n");
        assert!(typed.contains("function parseDate(value: string): Date {"));
        assert!(typed.contains("function calculateAge(birthDate: Date): number {"));

        let plain = date_helpers(false).join("\n");
        assert!(plain.contains("function parseDate(value) {"));
        assert!(plain.contains("function startOfToday() {"));
    }
}
