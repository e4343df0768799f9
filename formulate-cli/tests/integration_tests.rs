//! Integration tests for formulate-cli.
//!
//! These tests run the scan, load, generate and write pipeline against
//! temporary directories, and edit form files the way the subcommands do.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use clap::Parser;
use tempfile::TempDir;

use formulate::{palette_item, FieldType, FieldUpdate, Form, FormType, PreviewValidator};
use formulate_cli::{
    config::{CliArgs, ConfigManager},
    edit::FieldEdits,
    loader,
    scanner::FormScanner,
    writer::{FileWriter, WriteResult},
    FormGenerator,
};

const CONTACT: &str = r#"{
  "id": "1",
  "name": "Contact",
  "type": "basic",
  "fields": [
    {
      "id": "email-1700000000000",
      "type": "email",
      "label": "Email",
      "placeholder": "Enter email",
      "required": true
    }
  ]
}"#;

const SIGNUP: &str = r#"{
  "id": "2",
  "name": "Sign up",
  "type": "shadcn",
  "fields": [
    {
      "id": "dob",
      "type": "date",
      "label": "Date of birth",
      "required": true,
      "validation": { "dateType": "minAge", "ageValue": 18 }
    }
  ]
}"#;

/// Create a temporary directory with test files.
fn create_temp_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

/// Scan, load and generate everything below `input` into `output`.
fn generate_all(input: &Path, output: &Path, format: Option<FormType>) -> Vec<WriteResult> {
    let config = ConfigManager::merge_cli_args(
        ConfigManager::default_config(),
        &CliArgs {
            output: Some(output.to_path_buf()),
            format,
            ..Default::default()
        },
    );
    let files = FormScanner::new(input).scan().unwrap();
    let (forms, errors) = loader::load_all(&files);
    assert!(errors.is_empty(), "unexpected load errors: {:?}", errors);

    let writer = FileWriter::new(false);
    FormGenerator::new(config)
        .generate(&forms)
        .iter()
        .map(|artifact| writer.write_artifact(artifact).unwrap())
        .collect()
}

// =============================================================================
// Generation Pipeline
// =============================================================================

#[test]
fn test_generate_writes_one_artifact_per_form() {
    let project = create_temp_project(&[
        ("forms/contact.form.json", CONTACT),
        ("forms/auth/signup.form.json", SIGNUP),
        ("forms/notes.json", "{}"),
    ]);
    let out = project.path().join("generated");

    let results = generate_all(&project.path().join("forms"), &out, None);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(WriteResult::was_written));

    let html = fs::read_to_string(out.join("contact.html")).unwrap();
    assert!(html.contains("<form id=\"form-1\" novalidate>"));
    assert!(html.contains("validator.addField(\"#email-1700000000000\", ["));

    let tsx = fs::read_to_string(out.join("auth").join("signup.tsx")).unwrap();
    assert!(tsx.contains("export default function SignUp() {"));
    assert!(tsx.contains("calculateAge(parseDate(value)) >= 18"));
}

#[test]
fn test_regenerating_leaves_files_unchanged() {
    let project = create_temp_project(&[("contact.form.json", CONTACT)]);
    let out = project.path().join("out");

    generate_all(project.path(), &out, None);
    let again = generate_all(project.path(), &out, None);
    assert!(matches!(again[0], WriteResult::Unchanged { .. }));
}

#[test]
fn test_format_override_changes_extension() {
    let project = create_temp_project(&[("contact.form.json", CONTACT)]);
    let out = project.path().join("out");

    generate_all(project.path(), &out, Some(FormType::Shadcn));
    assert!(out.join("contact.tsx").exists());
    assert!(!out.join("contact.html").exists());
}

#[test]
fn test_config_file_drives_code_style() {
    let project = create_temp_project(&[
        ("contact.form.json", CONTACT),
        (
            "formulate.toml",
            "[generator]\nindent = \"tabs\"\ngenerate_docs = true\n",
        ),
    ]);

    let config = ConfigManager::load(Some(&project.path().join("formulate.toml"))).unwrap();
    let form = loader::load_form(&project.path().join("contact.form.json")).unwrap();
    let code = FormGenerator::new(config).generate_form(&form).code;

    assert!(code.starts_with("<!-- Contact -->\n"));
    assert!(code.contains("\n\t<div class=\"form-field\">\n"));
}

#[test]
fn test_unreadable_forms_are_reported_not_fatal() {
    let project = create_temp_project(&[
        ("good.form.json", CONTACT),
        ("bad.form.json", "{ \"id\": "),
    ]);

    let files = FormScanner::new(project.path()).scan().unwrap();
    let (forms, errors) = loader::load_all(&files);
    assert_eq!(forms.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("bad.form.json"));
}

// =============================================================================
// Up-to-date Check
// =============================================================================

#[test]
fn test_check_detects_stale_artifact() {
    let project = create_temp_project(&[("contact.form.json", CONTACT)]);
    let form_path = project.path().join("contact.form.json");
    let out = project.path().join("out");
    generate_all(project.path(), &out, None);

    let generator = FormGenerator::new(ConfigManager::default_config());
    let artifact = fs::read_to_string(out.join("contact.html")).unwrap();
    let fresh = generator.generate_form(&loader::load_form(&form_path).unwrap());
    assert_eq!(artifact.trim(), fresh.code.trim());

    let mut form = loader::load_form(&form_path).unwrap();
    form.update_field(0, FieldUpdate::Label("Work email".to_string()))
        .unwrap();
    loader::save_form(&form_path, &form).unwrap();

    let fresh = generator.generate_form(&loader::load_form(&form_path).unwrap());
    assert_ne!(artifact.trim(), fresh.code.trim());
}

// =============================================================================
// Editing Form Files
// =============================================================================

#[test]
fn test_edit_session_round_trips_through_json() {
    let project = TempDir::new().unwrap();
    let path = project.path().join("profile.form.json");
    loader::create_form(&path, &Form::new("9", "Profile"), false).unwrap();

    let mut form = loader::load_form(&path).unwrap();
    form.add_from_palette(&palette_item(FieldType::Text), 1);
    form.add_from_palette(&palette_item(FieldType::Number), 2);
    loader::save_form(&path, &form).unwrap();

    #[derive(Parser)]
    struct SetArgs {
        #[command(flatten)]
        edits: FieldEdits,
    }
    let edits = SetArgs::try_parse_from([
        "set",
        "--label",
        "Age",
        "--required",
        "true",
        "--min",
        "0",
        "--max",
        "130",
    ])
    .unwrap()
    .edits;

    let mut form = loader::load_form(&path).unwrap();
    for update in edits.into_updates() {
        form.update_field(1, update).unwrap();
    }
    form.reorder(1, Some(0)).unwrap();
    loader::save_form(&path, &form).unwrap();

    let form = loader::load_form(&path).unwrap();
    assert_eq!(form.fields[0].id, "number-2");
    assert_eq!(form.fields[0].label, "Age");
    assert!(form.fields[0].required);
    assert_eq!(form.fields[1].id, "text-1");

    let validator = PreviewValidator::with_today(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    let mut values = HashMap::new();
    values.insert("number-2".to_string(), "140".to_string());
    let result = validator.validate_form(&form, &values);
    assert_eq!(
        result.error_for("number-2").unwrap().message,
        "Maximum value is 130"
    );
}

#[test]
fn test_rejected_edit_reports_schema_error() {
    let mut form = loader::parse_form(Path::new("contact.form.json"), CONTACT).unwrap();
    let err: formulate_cli::CliError = form.remove_field(5).unwrap_err().into();
    assert!(err.to_string().contains("out of bounds"));
    assert_eq!(form.len(), 1);
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_default_config_file_round_trips() {
    let project = create_temp_project(&[(
        "formulate.toml",
        ConfigManager::default_config_content(),
    )]);
    let config = ConfigManager::load(Some(&project.path().join("formulate.toml"))).unwrap();
    assert_eq!(config, ConfigManager::default_config());
}
