//! Reading and writing form definition files.
//!
//! A form file holds one [`Form`] as JSON, in the same shape the builder
//! persists: `id`, `name`, `type` and the ordered `fields`.

use std::path::{Path, PathBuf};

use formulate::Form;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult, FormFileError, WriteError};
use crate::scanner::{SourceFile, FORM_FILE_SUFFIX};

/// A parsed form together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedForm {
    /// Path of the definition file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    pub form: Form,
}

impl LoadedForm {
    /// File name without the `.form.json` suffix, used for artifacts.
    pub fn stem(&self) -> String {
        output_stem(&self.relative_path)
    }
}

/// File name without the form suffix (or plain extension).
pub fn output_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Some(stem) = name.strip_suffix(FORM_FILE_SUFFIX).filter(|s| !s.is_empty()) {
        return stem.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name)
}

/// Parse form JSON read from `path`.
pub fn parse_form(path: &Path, content: &str) -> CliResult<Form> {
    let form: Form = serde_json::from_str(content)
        .map_err(|e| FormFileError::invalid_json(path.to_path_buf(), e.to_string()))?;
    debug!(path = %path.display(), fields = form.len(), "Parsed form");
    Ok(form)
}

/// Read and parse a form file.
pub fn load_form(path: &Path) -> CliResult<Form> {
    let content = std::fs::read_to_string(path).map_err(|e| FormFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_form(path, &content)
}

/// Parse scanned files, collecting failures instead of stopping at the first.
pub fn load_all(files: &[SourceFile]) -> (Vec<LoadedForm>, Vec<CliError>) {
    let mut forms = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        match parse_form(&file.path, &file.content) {
            Ok(form) => forms.push(LoadedForm {
                path: file.path.clone(),
                relative_path: file.relative_path.clone(),
                form,
            }),
            Err(e) => {
                warn!(path = %file.path.display(), "Skipping unreadable form");
                errors.push(e);
            }
        }
    }

    (forms, errors)
}

/// Serialize a form as pretty JSON with a trailing newline.
pub fn form_to_json(path: &Path, form: &Form) -> CliResult<String> {
    let mut json = serde_json::to_string_pretty(form).map_err(|e| FormFileError::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

/// Write a form back to its file.
pub fn save_form(path: &Path, form: &Form) -> CliResult<()> {
    let json = form_to_json(path, form)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    std::fs::write(path, json).map_err(|e| WriteError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), fields = form.len(), "Saved form");
    Ok(())
}

/// Write a new form file, refusing to replace an existing one unless forced.
pub fn create_form(path: &Path, form: &Form, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(FormFileError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into());
    }
    save_form(path, form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulate::{Field, FieldType, FormType};
    use tempfile::TempDir;

    fn sample() -> Form {
        Form::new("7", "Contact")
            .with_form_type(FormType::Shadcn)
            .with_field(Field::new("name", FieldType::Text, "Name").with_required(true))
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(Path::new("a/contact.form.json")), "contact");
        assert_eq!(output_stem(Path::new("contact.json")), "contact");
        assert_eq!(output_stem(Path::new(".form.json")), ".form");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/contact.form.json");

        save_form(&path, &sample()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));
        assert!(content.contains("\"type\": \"shadcn\""));

        assert_eq!(load_form(&path).unwrap(), sample());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contact.form.json");

        create_form(&path, &sample(), false).unwrap();
        let again = create_form(&path, &Form::default(), false);
        assert!(matches!(
            again,
            Err(CliError::Form(FormFileError::AlreadyExists { .. }))
        ));

        create_form(&path, &Form::default(), true).unwrap();
        assert_eq!(load_form(&path).unwrap(), Form::default());
    }

    #[test]
    fn test_invalid_json_names_file() {
        let err = parse_form(Path::new("bad.form.json"), "{\"id\": 1").unwrap_err();
        assert!(matches!(
            err,
            CliError::Form(FormFileError::InvalidJson { .. })
        ));
        assert!(err.to_string().contains("bad.form.json"));
    }

    #[test]
    fn test_malformed_date_rule_fails_the_load() {
        let json = r#"{"id": "1", "name": "Booking", "type": "basic", "fields": [
            {"id": "when", "type": "date", "label": "When",
             "validation": {"dateType": "minage", "ageValue": 18}}
        ]}"#;
        let err = parse_form(Path::new("booking.form.json"), json).unwrap_err();
        assert!(matches!(
            err,
            CliError::Form(FormFileError::InvalidJson { .. })
        ));
        assert!(err.to_string().contains("unknown date type 'minage'"));
    }

    #[test]
    fn test_load_all_collects_errors() {
        let good = SourceFile {
            path: PathBuf::from("good.form.json"),
            relative_path: PathBuf::from("good.form.json"),
            content: serde_json::to_string(&sample()).unwrap(),
        };
        let bad = SourceFile {
            path: PathBuf::from("bad.form.json"),
            relative_path: PathBuf::from("bad.form.json"),
            content: "not json".to_string(),
        };

        let (forms, errors) = load_all(&[good, bad]);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].stem(), "good");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_form(Path::new("/nonexistent/x.form.json")).unwrap_err();
        assert!(matches!(err, CliError::Form(FormFileError::Read { .. })));
    }
}
