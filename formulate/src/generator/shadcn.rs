//! shadcn/ui + Zod emitter.
//!
//! Renders a React component built on `react-hook-form` with a Zod schema
//! resolver. Each field becomes one schema entry and one markup group.

use convert_case::{Case, Casing};
use tracing::debug;

use super::code::CodeWriter;
use super::traits::{CodeGenerator, GeneratedCode, GeneratorConfig};
use crate::escape;
use crate::ir::{date_helpers, FieldIR, FormIR, Rule};
use crate::schema::{ControlKind, ValueKind};

/// Component name used when the form name yields no identifier.
pub const DEFAULT_COMPONENT_NAME: &str = "GeneratedForm";

/// Generator for the `shadcn` form type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadcnEmitter;

/// UI components in import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum UiComponent {
    Button,
    Checkbox,
    Input,
    Label,
    RadioGroup,
    Select,
    Switch,
    Textarea,
}

impl UiComponent {
    fn import_line(&self) -> &'static str {
        match self {
            UiComponent::Button => r#"import { Button } from "@/components/ui/button""#,
            UiComponent::Checkbox => r#"import { Checkbox } from "@/components/ui/checkbox""#,
            UiComponent::Input => r#"import { Input } from "@/components/ui/input""#,
            UiComponent::Label => r#"import { Label } from "@/components/ui/label""#,
            UiComponent::RadioGroup => {
                r#"import { RadioGroup, RadioGroupItem } from "@/components/ui/radio-group""#
            }
            UiComponent::Select => {
                r#"import { Select, SelectContent, SelectItem, SelectTrigger, SelectValue } from "@/components/ui/select""#
            }
            UiComponent::Switch => r#"import { Switch } from "@/components/ui/switch""#,
            UiComponent::Textarea => r#"import { Textarea } from "@/components/ui/textarea""#,
        }
    }

    fn for_control(control: ControlKind) -> Self {
        match control {
            ControlKind::Input(_) => UiComponent::Input,
            ControlKind::TextArea => UiComponent::Textarea,
            ControlKind::Select => UiComponent::Select,
            ControlKind::RadioGroup => UiComponent::RadioGroup,
            ControlKind::Checkbox => UiComponent::Checkbox,
            ControlKind::Switch => UiComponent::Switch,
        }
    }
}

impl ShadcnEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Component name derived from the form name.
    pub fn component_name(form_name: &str) -> String {
        let words: String = form_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect();
        let name = words.to_case(Case::Pascal);
        match name.chars().next() {
            Some(first) if first.is_ascii_alphabetic() => name,
            _ => DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn emit_imports(&self, form: &FormIR, w: &mut CodeWriter) {
        let mut used = vec![UiComponent::Button];
        for field in &form.fields {
            used.push(UiComponent::Label);
            used.push(UiComponent::for_control(field.field_type.control()));
        }
        used.sort();
        used.dedup();

        w.line(r#"import { zodResolver } from "@hookform/resolvers/zod""#);
        w.line(r#"import { useForm } from "react-hook-form""#);
        w.line(r#"import * as z from "zod""#);
        w.blank();
        for component in used {
            w.line(component.import_line());
        }
    }

    // =========================================================================
    // Schema
    // =========================================================================

    fn emit_schema(&self, form: &FormIR, w: &mut CodeWriter) {
        if form.fields.is_empty() {
            w.line("const formSchema = z.object({})");
            return;
        }
        w.open("const formSchema = z.object({");
        for field in &form.fields {
            w.line(format!(
                "{}: {},",
                escape::js_quoted(&field.id),
                field_schema(field)
            ));
        }
        w.close("})");
    }

    // =========================================================================
    // Component
    // =========================================================================

    fn emit_component(&self, form: &FormIR, config: &GeneratorConfig, w: &mut CodeWriter) {
        let name = Self::component_name(&form.name);
        if config.generate_docs {
            w.line(format!("/** {} */", form.name.replace("*/", "* /")));
        }
        w.open(format!("export default function {}() {{", name));

        // Number inputs hold strings until the schema coerces them, so the
        // form values use the schema's input type and submit its output type.
        w.open(
            "const form = useForm<z.input<typeof formSchema>, unknown, z.output<typeof formSchema>>({",
        );
        w.line("resolver: zodResolver(formSchema),");
        if form.fields.is_empty() {
            w.line("defaultValues: {},");
        } else {
            w.open("defaultValues: {");
            for field in &form.fields {
                let default = if field.field_type.value_kind().is_boolean() {
                    "false"
                } else {
                    "\"\""
                };
                w.line(format!("{}: {},", escape::js_quoted(&field.id), default));
            }
            w.close("},");
        }
        w.close("})");
        w.blank();

        w.open("function onSubmit(values: z.output<typeof formSchema>) {");
        w.line("console.log(values)");
        w.close("}");
        w.blank();

        w.open("return (");
        w.open(r#"<form onSubmit={form.handleSubmit(onSubmit)} className="space-y-6">"#);
        for field in &form.fields {
            self.emit_field(field, w);
        }
        w.line(r#"<Button type="submit">Submit</Button>"#);
        w.close("</form>");
        w.close(")");
        w.close("}");
    }

    fn emit_field(&self, field: &FieldIR, w: &mut CodeWriter) {
        let key = escape::js_quoted(&field.id);
        let id = escape::html(&field.id);
        let label = escape::jsx_text(&field.label);
        let placeholder = field
            .placeholder
            .as_deref()
            .map(escape::html)
            .unwrap_or_default();

        w.open(r#"<div className="space-y-2">"#);
        match field.field_type.control() {
            ControlKind::Input(input_type) => {
                w.line(format!(r#"<Label htmlFor="{}">{}</Label>"#, id, label));
                w.open("<Input");
                w.line(format!(r#"id="{}""#, id));
                w.line(format!(r#"type="{}""#, input_type));
                w.line(format!(r#"placeholder="{}""#, placeholder));
                w.line(format!("{{...form.register({})}}", key));
                w.close("/>");
            }
            ControlKind::TextArea => {
                w.line(format!(r#"<Label htmlFor="{}">{}</Label>"#, id, label));
                w.open("<Textarea");
                w.line(format!(r#"id="{}""#, id));
                w.line(format!(r#"placeholder="{}""#, placeholder));
                w.line(format!("{{...form.register({})}}", key));
                w.close("/>");
            }
            ControlKind::Select => {
                w.line(format!(r#"<Label htmlFor="{}">{}</Label>"#, id, label));
                w.open(format!(
                    "<Select onValueChange={{(value) => form.setValue({}, value, {{ shouldValidate: true }})}}>",
                    key
                ));
                w.open(format!(r#"<SelectTrigger id="{}">"#, id));
                w.line(format!(r#"<SelectValue placeholder="{}" />"#, placeholder));
                w.close("</SelectTrigger>");
                w.open("<SelectContent>");
                for option in &field.options {
                    w.line(format!(
                        r#"<SelectItem value="{}">{}</SelectItem>"#,
                        escape::html(&option.value),
                        escape::jsx_text(&option.label)
                    ));
                }
                w.close("</SelectContent>");
                w.close("</Select>");
            }
            ControlKind::RadioGroup => {
                w.line(format!("<Label>{}</Label>", label));
                w.open(format!(
                    "<RadioGroup onValueChange={{(value) => form.setValue({}, value, {{ shouldValidate: true }})}}>",
                    key
                ));
                for (index, option) in field.options.iter().enumerate() {
                    let item_id = escape::html(&format!("{}-{}", field.id, index));
                    w.open(r#"<div className="flex items-center space-x-2">"#);
                    w.line(format!(
                        r#"<RadioGroupItem value="{}" id="{}" />"#,
                        escape::html(&option.value),
                        item_id
                    ));
                    w.line(format!(
                        r#"<Label htmlFor="{}">{}</Label>"#,
                        item_id,
                        escape::jsx_text(&option.label)
                    ));
                    w.close("</div>");
                }
                w.close("</RadioGroup>");
            }
            control @ (ControlKind::Checkbox | ControlKind::Switch) => {
                let (tag, checked) = if control == ControlKind::Switch {
                    ("Switch", "checked")
                } else {
                    ("Checkbox", "checked === true")
                };
                w.open(r#"<div className="flex items-center space-x-2">"#);
                w.open(format!("<{}", tag));
                w.line(format!(r#"id="{}""#, id));
                w.line(format!("checked={{form.watch({})}}", key));
                w.line(format!(
                    "onCheckedChange={{(checked) => form.setValue({}, {}, {{ shouldValidate: true }})}}",
                    key, checked
                ));
                w.close("/>");
                w.line(format!(r#"<Label htmlFor="{}">{}</Label>"#, id, label));
                w.close("</div>");
            }
        }
        w.open(format!("{{form.formState.errors[{}] && (", key));
        w.line(format!(
            r#"<p className="text-sm text-red-500">{{form.formState.errors[{}]?.message}}</p>"#,
            key
        ));
        w.close(")}");
        w.close("</div>");
    }
}

/// Zod schema expression for one field.
fn field_schema(field: &FieldIR) -> String {
    match field.field_type.value_kind() {
        ValueKind::Boolean => {
            let mut schema = "z.boolean()".to_string();
            if field.required {
                schema.push_str(&format!(
                    ".refine((value) => value === true, {{ message: {} }})",
                    escape::js_quoted(&Rule::Required.message())
                ));
            }
            schema
        }
        ValueKind::Number => number_schema(field),
        ValueKind::Text | ValueKind::Date | ValueKind::Choice => {
            let mut schema = "z.string()".to_string();
            let mut refines = Vec::new();
            for rule in &field.rules {
                match string_method(rule) {
                    Some(method) => schema.push_str(&method),
                    None => refines.extend(refine(rule)),
                }
            }
            for r in refines {
                schema.push_str(&r);
            }
            let needs_empty = !field.required
                && field
                    .rules
                    .iter()
                    .any(|r| string_method(r).is_some() && *r != Rule::Required);
            if needs_empty {
                schema.push_str(".or(z.literal(\"\"))");
            }
            schema
        }
    }
}

/// Native `z.string()` combinator for a rule, if there is one.
fn string_method(rule: &Rule) -> Option<String> {
    let message = escape::js_quoted(&rule.message());
    let method = match rule {
        Rule::Required => format!(".min(1, {})", message),
        Rule::MinLength(n) => format!(".min({}, {})", n, message),
        Rule::MaxLength(n) => format!(".max({}, {})", n, message),
        Rule::Pattern(pattern) => format!(".regex({}, {})", pattern.js_literal(), message),
        Rule::Email => format!(".email({})", message),
        _ => return None,
    };
    Some(method)
}

/// `.refine(...)` call for a rule expressed as a JavaScript predicate.
fn refine(rule: &Rule) -> Option<String> {
    rule.js_predicate().map(|predicate| {
        format!(
            ".refine({}, {{ message: {} }})",
            predicate,
            escape::js_quoted(&rule.message())
        )
    })
}

/// Number inputs submit strings; an empty string must not coerce to zero.
fn number_schema(field: &FieldIR) -> String {
    let mut number = format!(
        "z.coerce.number({{ invalid_type_error: {} }})",
        escape::js_quoted(&Rule::Number.message())
    );
    for rule in &field.rules {
        let message = escape::js_quoted(&rule.message());
        match rule {
            Rule::Min(n) => number.push_str(&format!(".min({}, {})", n, message)),
            Rule::Max(n) => number.push_str(&format!(".max({}, {})", n, message)),
            _ => {}
        }
    }
    if field.required {
        format!(
            "z.string().min(1, {}).pipe({})",
            escape::js_quoted(&Rule::Required.message()),
            number
        )
    } else {
        format!(
            "z.preprocess((value) => (value === \"\" ? undefined : value), {}.optional())",
            number
        )
    }
}

impl CodeGenerator for ShadcnEmitter {
    fn id(&self) -> &'static str {
        "shadcn"
    }

    fn name(&self) -> &'static str {
        "shadcn/ui + Zod Component Generator"
    }

    fn file_extension(&self) -> &'static str {
        "tsx"
    }

    fn generate(&self, form: &FormIR, config: &GeneratorConfig) -> GeneratedCode {
        let mut w = CodeWriter::new();
        self.emit_imports(form, &mut w);
        w.blank();
        if form.has_date_rules() {
            w.snippet(&date_helpers(true));
            w.blank();
        }
        self.emit_schema(form, &mut w);
        w.blank();
        self.emit_component(form, config, &mut w);

        debug!(form = %form.id, fields = form.fields.len(), "Generated shadcn component");

        GeneratedCode::new(w.finish(config), self.file_extension())
            .with_diagnostics(form.diagnostics.clone())
    }
}
