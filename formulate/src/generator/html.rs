//! Basic HTML emitter.
//!
//! Renders a plain `<form>` with one block per field, followed by a script
//! that registers every field's rules with just-validate.

use tracing::debug;

use super::code::CodeWriter;
use super::traits::{CodeGenerator, GeneratedCode, GeneratorConfig};
use crate::escape;
use crate::ir::{date_helpers, FieldIR, FormIR, Rule};
use crate::schema::ControlKind;

/// Generator for the `basic` form type.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEmitter;

impl HtmlEmitter {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    // Markup
    // =========================================================================

    fn emit_form(&self, form: &FormIR, w: &mut CodeWriter) {
        w.open(format!(
            "<form id=\"{}\" novalidate>",
            escape::html(&form_dom_id(form))
        ));
        for field in &form.fields {
            self.emit_field(field, w);
        }
        w.line("<button type=\"submit\">Submit</button>");
        w.close("</form>");
    }

    fn emit_field(&self, field: &FieldIR, w: &mut CodeWriter) {
        let id = escape::html(&field.id);
        let label = escape::html(&field.label);
        let required = if field.required { " required" } else { "" };
        let placeholder = field
            .placeholder
            .as_deref()
            .map(|p| format!(" placeholder=\"{}\"", escape::html(p)))
            .unwrap_or_default();

        let control = field.field_type.control();
        w.open("<div class=\"form-field\">");
        match control {
            ControlKind::Input(input_type) => {
                w.line(format!("<label for=\"{}\">{}</label>", id, label));
                w.line(format!(
                    "<input type=\"{}\" id=\"{}\" name=\"{}\"{}{}>",
                    input_type, id, id, placeholder, required
                ));
            }
            ControlKind::TextArea => {
                w.line(format!("<label for=\"{}\">{}</label>", id, label));
                w.line(format!(
                    "<textarea id=\"{}\" name=\"{}\"{}{}></textarea>",
                    id, id, placeholder, required
                ));
            }
            ControlKind::Select => {
                w.line(format!("<label for=\"{}\">{}</label>", id, label));
                w.open(format!(
                    "<select id=\"{}\" name=\"{}\"{}>",
                    id, id, required
                ));
                let prompt = field.placeholder.as_deref().unwrap_or("Select an option");
                w.line(format!(
                    "<option value=\"\">{}</option>",
                    escape::html(prompt)
                ));
                for option in &field.options {
                    w.line(format!(
                        "<option value=\"{}\">{}</option>",
                        escape::html(&option.value),
                        escape::html(&option.label)
                    ));
                }
                w.close("</select>");
            }
            ControlKind::RadioGroup => {
                w.open(format!("<fieldset id=\"{}\">", id));
                w.line(format!("<legend>{}</legend>", label));
                for option in &field.options {
                    w.open("<label>");
                    w.line(format!(
                        "<input type=\"radio\" name=\"{}\" value=\"{}\"{}>",
                        id,
                        escape::html(&option.value),
                        required
                    ));
                    w.line(escape::html(&option.label));
                    w.close("</label>");
                }
                w.close("</fieldset>");
            }
            ControlKind::Checkbox | ControlKind::Switch => {
                let role = if control == ControlKind::Switch {
                    " role=\"switch\""
                } else {
                    ""
                };
                w.open("<label>");
                w.line(format!(
                    "<input type=\"checkbox\" id=\"{}\" name=\"{}\" value=\"true\"{}{}>",
                    id, id, role, required
                ));
                w.line(label);
                w.close("</label>");
            }
        }
        w.close("</div>");
    }

    // =========================================================================
    // Validation script
    // =========================================================================

    fn emit_script(&self, form: &FormIR, config: &GeneratorConfig, w: &mut CodeWriter) {
        w.line(format!(
            "<script src=\"{}\"></script>",
            escape::html(&config.validation_cdn)
        ));
        w.open("<script>");

        if form.has_date_rules() {
            w.snippet(&date_helpers(false));
            w.blank();
        }

        w.line(format!(
            "const validator = new JustValidate({});",
            escape::js_quoted(&escape::css_id_selector(&form_dom_id(form)))
        ));

        for field in form.fields.iter().filter(|f| !f.rules.is_empty()) {
            w.blank();
            self.emit_field_rules(field, w);
        }

        w.blank();
        w.open("validator.onSuccess((event) => {");
        w.line("console.log(\"Validation passed and form submitted\", event);");
        w.close("});");
        w.close("</script>");
    }

    fn emit_field_rules(&self, field: &FieldIR, w: &mut CodeWriter) {
        let selector = escape::js_quoted(&escape::css_id_selector(&field.id));

        if field.field_type.control() == ControlKind::RadioGroup {
            w.line(format!(
                "validator.addRequiredGroup({}, {});",
                selector,
                escape::js_quoted(&Rule::Required.message())
            ));
            return;
        }

        w.open(format!("validator.addField({}, [", selector));
        for rule in &field.rules {
            w.line(format!("{},", rule_object(rule)));
        }
        w.close("]);");
    }
}

/// just-validate rule object for one rule.
fn rule_object(rule: &Rule) -> String {
    let message = escape::js_quoted(&rule.message());
    match rule {
        Rule::Required => format!("{{ rule: \"required\", errorMessage: {} }}", message),
        Rule::MinLength(n) => format!(
            "{{ rule: \"minLength\", value: {}, errorMessage: {} }}",
            n, message
        ),
        Rule::MaxLength(n) => format!(
            "{{ rule: \"maxLength\", value: {}, errorMessage: {} }}",
            n, message
        ),
        Rule::Number => format!("{{ rule: \"number\", errorMessage: {} }}", message),
        Rule::Min(n) => format!(
            "{{ rule: \"minNumber\", value: {}, errorMessage: {} }}",
            n, message
        ),
        Rule::Max(n) => format!(
            "{{ rule: \"maxNumber\", value: {}, errorMessage: {} }}",
            n, message
        ),
        Rule::Pattern(pattern) => format!(
            "{{ rule: \"customRegexp\", value: {}, errorMessage: {} }}",
            pattern.js_literal(),
            message
        ),
        Rule::Email => format!("{{ rule: \"email\", errorMessage: {} }}", message),
        date_rule => format!(
            "{{ validator: {}, errorMessage: {} }}",
            date_rule.js_predicate().unwrap_or_else(|| "() => true".to_string()),
            message
        ),
    }
}

fn form_dom_id(form: &FormIR) -> String {
    format!("form-{}", form.id)
}

impl CodeGenerator for HtmlEmitter {
    fn id(&self) -> &'static str {
        "basic"
    }

    fn name(&self) -> &'static str {
        "HTML + just-validate Generator"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn generate(&self, form: &FormIR, config: &GeneratorConfig) -> GeneratedCode {
        let mut w = CodeWriter::new();
        if config.generate_docs {
            w.line(format!(
                "<!-- {} -->",
                escape::html(&form.name).replace("--", "- -")
            ));
        }
        self.emit_form(form, &mut w);
        w.blank();
        self.emit_script(form, config, &mut w);

        debug!(form = %form.id, fields = form.fields.len(), "Generated basic form");

        GeneratedCode::new(w.finish(config), self.file_extension())
            .with_diagnostics(form.diagnostics.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ir::lower;
    use crate::schema::{DateRule, Field, FieldType, Form, ValidationRules};

    fn render(form: &Form) -> String {
        HtmlEmitter::new()
            .generate(&lower(form), &GeneratorConfig::default())
            .code
    }

    #[test]
    fn test_emitter_metadata() {
        let emitter = HtmlEmitter::new();
        assert_eq!(emitter.id(), "basic");
        assert_eq!(emitter.file_extension(), "html");
    }

    #[test]
    fn test_email_field_markup_and_rules() {
        let form = Form::default().with_field(
            Field::new("email-1700000000000", FieldType::Email, "Email")
                .with_placeholder("Enter email")
                .with_required(true),
        );
        let code = render(&form);

        assert!(code.starts_with("<form id=\"form-1\" novalidate>\n"));
        assert!(code.contains(
            "    <input type=\"email\" id=\"email-1700000000000\" name=\"email-1700000000000\" placeholder=\"Enter email\" required>\n"
        ));
        assert!(code.contains("validator.addField(\"#email-1700000000000\", [\n"));
        assert!(code.contains(
            "{ rule: \"required\", errorMessage: \"This field is required\" },"
        ));
        assert!(code.contains("{ rule: \"email\", errorMessage: \"Invalid email address\" },"));
        let required_at = code.find("rule: \"required\"").unwrap();
        let email_at = code.find("rule: \"email\"").unwrap();
        assert!(required_at < email_at);
    }

    #[test]
    fn test_one_block_per_field() {
        let form = Form::default()
            .with_field(Field::new("a", FieldType::Text, "A"))
            .with_field(Field::new("b", FieldType::Textarea, "B"))
            .with_field(Field::new("c", FieldType::Switch, "C"));
        let code = render(&form);
        assert_eq!(code.matches("<div class=\"form-field\">").count(), 3);
        assert!(code.contains("role=\"switch\""));
        assert!(!code.contains("addField"));
    }

    #[test]
    fn test_radio_uses_required_group() {
        let form = Form::default().with_field(
            Field::new("size", FieldType::Radio, "Size")
                .with_required(true)
                .with_option("Small", "s")
                .with_option("Large", "l"),
        );
        let code = render(&form);
        assert!(code.contains("<fieldset id=\"size\">"));
        assert_eq!(code.matches("type=\"radio\"").count(), 2);
        assert!(code.contains(
            "validator.addRequiredGroup(\"#size\", \"This field is required\");"
        ));
    }

    #[test]
    fn test_select_options() {
        let form = Form::default().with_field(
            Field::new("color", FieldType::Select, "Color").with_option("Red & Pink", "red"),
        );
        let code = render(&form);
        assert!(code.contains("<option value=\"\">Select an option</option>"));
        assert!(code.contains("<option value=\"red\">Red &amp; Pink</option>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let form = Form::default()
            .with_field(Field::new("x", FieldType::Text, "<script>alert(1)</script>"));
        let code = render(&form);
        assert!(!code.contains("<script>alert"));
        assert!(code.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_pattern_and_numbers() {
        let form = Form::default()
            .with_field(
                Field::new("zip", FieldType::Text, "Zip")
                    .with_validation(ValidationRules::new().with_pattern("^\\d{5}/x$")),
            )
            .with_field(
                Field::new("qty", FieldType::Number, "Qty")
                    .with_validation(ValidationRules::new().with_min(1.0).with_max(9.5)),
            );
        let code = render(&form);
        assert!(code.contains("{ rule: \"customRegexp\", value: /^\\d{5}\\/x$/, errorMessage: \"Invalid format\" },"));
        assert!(code.contains("{ rule: \"number\", errorMessage: \"Please enter a valid number\" },"));
        assert!(code.contains("{ rule: \"minNumber\", value: 1, errorMessage: \"Minimum value is 1\" },"));
        assert!(code.contains("{ rule: \"maxNumber\", value: 9.5, errorMessage: \"Maximum value is 9.5\" },"));
    }

    #[test]
    fn test_date_helpers_only_with_date_rules() {
        let plain = Form::default().with_field(Field::new("a", FieldType::Text, "A"));
        assert!(!render(&plain).contains("function parseDate"));

        let dated = Form::default().with_field(
            Field::new("birth", FieldType::Date, "Birth").with_validation(
                ValidationRules::new().with_date_rule(DateRule::min_age(18)),
            ),
        );
        let code = render(&dated);
        assert_eq!(code.matches("function parseDate(value) {").count(), 1);
        assert!(code.contains(
            "{ validator: (value) => !value || calculateAge(parseDate(value)) >= 18, errorMessage: \"You must be at least 18 years old\" },"
        ));
    }

    #[test]
    fn test_date_range_messages() {
        let form = Form::default().with_field(
            Field::new("when", FieldType::Date, "When").with_validation(
                ValidationRules::new().with_date_rule(DateRule::range(
                    NaiveDate::from_ymd_opt(2025, 1, 1),
                    None,
                )),
            ),
        );
        let code = render(&form);
        assert!(code.contains("errorMessage: \"Date must be on or after 2025-01-01\""));
        assert!(!code.contains("on or before"));
    }

    #[test]
    fn test_docs_header_and_cdn() {
        let form = Form::new("signup", "Sign up");
        let config = GeneratorConfig::new()
            .with_generate_docs(true)
            .with_validation_cdn("/js/just-validate.js");
        let code = HtmlEmitter::new().generate(&lower(&form), &config).code;
        assert!(code.starts_with("<!-- Sign up -->\n<form id=\"form-signup\" novalidate>"));
        assert!(code.contains("<script src=\"/js/just-validate.js\"></script>"));
        assert!(code.contains("new JustValidate(\"#form-signup\");"));
    }
}
