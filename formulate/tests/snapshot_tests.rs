//! Snapshot tests for generated artifacts.
//!
//! These tests use insta to capture the complete output of both renderings
//! for a form that uses every field type and every date rule.
//! Run `cargo insta review` to review and accept snapshot changes.

use chrono::NaiveDate;

use formulate::{generate, DateRule, Field, FieldType, Form, FormType, ValidationRules};

fn date_field(id: &str, label: &str, rule: DateRule) -> Field {
    Field::new(id, FieldType::Date, label)
        .with_validation(ValidationRules::new().with_date_rule(rule))
}

fn account_form() -> Form {
    Form::new("account", "Account Signup")
        .with_field(
            Field::new("name", FieldType::Text, "Full name")
                .with_placeholder("Jane Doe")
                .with_required(true)
                .with_validation(ValidationRules::new().with_min_length(2).with_max_length(50)),
        )
        .with_field(
            Field::new("email", FieldType::Email, "Email")
                .with_placeholder("you@example.com")
                .with_required(true),
        )
        .with_field(
            Field::new("password", FieldType::Password, "Password")
                .with_required(true)
                .with_validation(
                    ValidationRules::new().with_pattern(r"^(?=.*\d)(?=.*[A-Z]).{8,}$"),
                ),
        )
        .with_field(
            Field::new("bio", FieldType::Textarea, "Bio")
                .with_placeholder("Tell us about you")
                .with_validation(ValidationRules::new().with_max_length(200)),
        )
        .with_field(
            Field::new("plan", FieldType::Select, "Plan")
                .with_required(true)
                .with_option("Free", "free")
                .with_option("Pro & Teams", "pro"),
        )
        .with_field(
            Field::new("contact", FieldType::Radio, "Contact method")
                .with_required(true)
                .with_option("Email", "email")
                .with_option("Phone", "phone"),
        )
        .with_field(Field::new("terms", FieldType::Checkbox, "I accept the terms").with_required(true))
        .with_field(Field::new("newsletter", FieldType::Switch, "Newsletter"))
        .with_field(
            Field::new("age", FieldType::Number, "Age")
                .with_validation(ValidationRules::new().with_min(18.0).with_max(120.0)),
        )
        .with_field(date_field("birth", "Date of birth", DateRule::min_age(18)).with_required(true))
        .with_field(date_field(
            "start",
            "Start date",
            DateRule::range(
                NaiveDate::from_ymd_opt(2025, 1, 1),
                NaiveDate::from_ymd_opt(2025, 12, 31),
            ),
        ))
        .with_field(date_field("delivery", "Delivery date", DateRule::FutureDate))
        .with_field(date_field("joined", "Joined on", DateRule::PastDate))
        .with_field(date_field("meeting", "Meeting day", DateRule::BusinessDay))
}

#[test]
fn snapshot_account_form_basic() {
    let code = generate(&account_form());
    insta::assert_snapshot!("account_form_basic", code);
}

#[test]
fn snapshot_account_form_shadcn() {
    let code = generate(&account_form().with_form_type(FormType::Shadcn));
    insta::assert_snapshot!("account_form_shadcn", code);
}
