//! # formulate
//!
//! CLI tool for building form definitions and generating form code.
//!
//! ## Usage
//!
//! ```bash
//! # Start a form and add fields
//! formulate new -o contact.form.json --name "Contact"
//! formulate add -i contact.form.json --type email --required
//! formulate set -i contact.form.json --index 0 --label "Work email" --min-length 6
//!
//! # Generate HTML / TSX for every *.form.json below ./forms
//! formulate generate -i ./forms -o ./generated
//!
//! # Watch mode for development
//! formulate generate -i ./forms --watch
//!
//! # Try values against the form's rules
//! formulate preview -i contact.form.json --value email-1700000000000=ada@example.com
//!
//! # Verify a generated file is up to date
//! formulate check -p ./generated/contact.html -i contact.form.json
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formulate::schema::palette::search;
use formulate::{palette_item, FieldType, FieldUpdate, Form, FormType, PreviewValidator};
use formulate_cli::{
    config::{CliArgs, Config, ConfigManager},
    edit::{parse_assignment, parse_day, FieldEdits},
    error::CliError,
    generator::FormGenerator,
    loader,
    scanner::FormScanner,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "formulate")]
#[command(author, version, about = "Build form definitions and generate HTML or shadcn/ui form code", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from form definition files
    Generate {
        /// Form file, or directory scanned for *.form.json
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering for every form: basic or shadcn
        #[arg(long)]
        format: Option<FormType>,

        /// Watch for file changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter form files by relative path (glob)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Check that a generated file is up to date with its form
    Check {
        /// Path to the generated file
        #[arg(short, long)]
        path: PathBuf,

        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Rendering the file was generated with
        #[arg(long)]
        format: Option<FormType>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate values against a form the way the live preview does
    Preview {
        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Field value, given as FIELD_ID=VALUE
        #[arg(long = "value", value_name = "FIELD_ID=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Date used as "today" (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        today: Option<NaiveDate>,
    },

    /// Create an empty form definition file
    New {
        /// Path of the new form file
        #[arg(short, long)]
        output: PathBuf,

        /// Form name
        #[arg(long, default_value = "New Form")]
        name: String,

        /// Form id
        #[arg(long, default_value = "1")]
        id: String,

        /// Rendering: basic or shadcn
        #[arg(long, default_value = "basic")]
        format: FormType,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Append a field built from the palette
    Add {
        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Field type
        #[arg(long = "type")]
        field_type: FieldType,

        /// Label instead of the palette default
        #[arg(long)]
        label: Option<String>,

        /// Mark the field as required
        #[arg(long)]
        required: bool,
    },

    /// Delete the field at an index
    Remove {
        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Zero-based field index
        #[arg(long)]
        index: usize,
    },

    /// Move a field to another position
    Move {
        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Current index
        #[arg(long)]
        from: usize,

        /// Target index; omitted means no move
        #[arg(long)]
        to: Option<usize>,
    },

    /// Change attributes of the field at an index
    Set {
        /// Form definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Zero-based field index
        #[arg(long)]
        index: usize,

        #[command(flatten)]
        edits: FieldEdits,
    },

    /// List palette entries, optionally filtered
    Palette {
        /// Search text matched against categories, labels and types
        query: Option<String>,
    },

    /// Initialize a new formulate configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "formulate.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Log to stderr; `--verbose` forces debug level, otherwise `RUST_LOG` or warn.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            format,
            watch,
            dry_run,
            config,
            filter,
        } => {
            let args = CliArgs {
                output,
                format,
                filter,
                ..Default::default()
            };
            cmd_generate(input, args, watch, dry_run, config)
        }

        Commands::Check {
            path,
            input,
            format,
            config,
        } => cmd_check(path, input, format, config),

        Commands::Preview {
            input,
            values,
            today,
        } => cmd_preview(input, values, today),

        Commands::New {
            output,
            name,
            id,
            format,
            force,
        } => cmd_new(output, Form::new(id, name).with_form_type(format), force),

        Commands::Add {
            input,
            field_type,
            label,
            required,
        } => cmd_add(input, field_type, label, required),

        Commands::Remove { input, index } => edit_form(&input, |form| {
            let removed = form.remove_field(index)?;
            Ok(format!("Removed field {}", removed.id))
        }),

        Commands::Move { input, from, to } => edit_form(&input, |form| {
            form.reorder(from, to)?;
            Ok(match to {
                Some(to) => format!("Moved field {} to {}", from, to),
                None => "Field order unchanged".to_string(),
            })
        }),

        Commands::Set {
            input,
            index,
            edits,
        } => cmd_set(input, index, edits),

        Commands::Palette { query } => cmd_palette(query.as_deref()),

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

/// Generate command implementation.
fn cmd_generate(
    input: PathBuf,
    args: CliArgs,
    watch: bool,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, &args);

    if watch {
        run_watch_mode(&input, &config, dry_run)
    } else {
        run_generate(&input, &config, dry_run)
    }
}

/// Run generation once.
fn run_generate(input: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Scanning for form files...".cyan());

    let mut scanner = FormScanner::new(input).with_gitignore(config.scan.respect_gitignore);
    if let Some(ref pattern) = config.scan.pattern {
        scanner = scanner.with_filter(pattern)?;
    }

    let files = scanner.scan_allow_empty()?;
    if files.is_empty() {
        println!("{}", "No *.form.json files found.".yellow());
        return Ok(());
    }

    println!("  Found {} form file(s)", files.len().to_string().green());

    let (forms, errors) = loader::load_all(&files);
    if !errors.is_empty() {
        println!("{} {} unreadable form(s):", "Warning:".yellow(), errors.len());
        for error in &errors {
            println!("  {}", error);
        }
    }

    if forms.is_empty() {
        println!("{}", "No valid forms to generate.".yellow());
        return Ok(());
    }

    println!("{}", "Generating form code...".cyan());

    let generator = FormGenerator::new(config.clone());
    let artifacts = generator.generate(&forms);
    let writer = FileWriter::new(dry_run);

    for artifact in &artifacts {
        for diagnostic in &artifact.generated.diagnostics {
            println!(
                "  {} {}: {}",
                "Note:".yellow(),
                artifact.source.display(),
                diagnostic
            );
        }

        match writer.write_artifact(artifact)? {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::Unchanged { path } => {
                println!("{} {} is up to date", "✓".green(), path.display());
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(input: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", input.display());
    println!("  Press Ctrl+C to stop\n");

    run_generate(input, config, dry_run)?;

    let watcher = FileWatcher::new(input);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(input, config, dry_run) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(
    artifact_path: PathBuf,
    input: PathBuf,
    format: Option<FormType>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Checking generated code...".cyan());

    if !artifact_path.exists() {
        return Err(CliError::Validation(format!(
            "Generated file not found: {}",
            artifact_path.display()
        )));
    }

    let existing_content = std::fs::read_to_string(&artifact_path)?;

    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            format,
            ..Default::default()
        },
    );

    let form = loader::load_form(&input)?;
    let generated = FormGenerator::new(config).generate_form(&form);

    if existing_content.trim() == generated.code.trim() {
        println!("{} {} is up to date", "✓".green(), artifact_path.display());
        Ok(())
    } else {
        println!("{} {} is out of date", "✗".red(), artifact_path.display());
        println!("  Run 'formulate generate' to update");
        Err(CliError::Validation("Generated code is out of date".to_string()))
    }
}

/// Preview command implementation.
fn cmd_preview(
    input: PathBuf,
    values: Vec<(String, String)>,
    today: Option<NaiveDate>,
) -> Result<(), CliError> {
    let form = loader::load_form(&input)?;
    let validator = today
        .map(PreviewValidator::with_today)
        .unwrap_or_default();

    let values: HashMap<String, String> = values.into_iter().collect();
    for id in values.keys() {
        if form.position(id).is_none() {
            println!("{} no field with id '{}'", "Warning:".yellow(), id);
        }
    }

    let result = validator.validate_form(&form, &values);

    println!("{} {}", "Preview:".cyan(), form.name);
    for field in &form.fields {
        match result.error_for(&field.id) {
            Some(error) => println!(
                "  {} {} ({}): {}",
                "✗".red(),
                field.label,
                field.id,
                error.message
            ),
            None => println!("  {} {} ({})", "✓".green(), field.label, field.id),
        }
    }

    if result.is_valid() {
        println!("{} Validation passed and form submitted", "✓".green());
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} field(s) rejected",
            result.errors.len()
        )))
    }
}

/// New command implementation.
fn cmd_new(output: PathBuf, form: Form, force: bool) -> Result<(), CliError> {
    loader::create_form(&output, &form, force)?;
    println!(
        "{} Created {} form: {}",
        "✓".green(),
        form.form_type,
        output.display()
    );
    Ok(())
}

/// Add command implementation.
fn cmd_add(
    input: PathBuf,
    field_type: FieldType,
    label: Option<String>,
    required: bool,
) -> Result<(), CliError> {
    edit_form(&input, |form| {
        let id = form
            .add_from_palette(&palette_item(field_type), Utc::now().timestamp_millis())
            .id
            .clone();
        let index = form.len() - 1;
        if let Some(label) = label {
            form.update_field(index, FieldUpdate::Label(label))?;
        }
        if required {
            form.update_field(index, FieldUpdate::Required(true))?;
        }
        Ok(format!("Added {} field {}", field_type, id))
    })
}

/// Set command implementation.
fn cmd_set(input: PathBuf, index: usize, edits: FieldEdits) -> Result<(), CliError> {
    let updates = edits.into_updates();
    if updates.is_empty() {
        return Err(CliError::invalid_argument(
            "set",
            "no attribute flags given (see --help)",
        ));
    }

    edit_form(&input, |form| {
        let count = updates.len();
        for update in updates {
            form.update_field(index, update)?;
        }
        let id = form.field(index).map(|f| f.id.as_str()).unwrap_or_default();
        Ok(format!("Applied {} change(s) to field {}", count, id))
    })
}

/// Load a form, apply an edit and save it only if the edit succeeded.
fn edit_form<F>(input: &Path, edit: F) -> Result<(), CliError>
where
    F: FnOnce(&mut Form) -> Result<String, CliError>,
{
    let mut form = loader::load_form(input)?;
    let summary = edit(&mut form)?;
    loader::save_form(input, &form)?;
    println!("{} {}", "✓".green(), summary);
    Ok(())
}

/// Palette command implementation.
fn cmd_palette(query: Option<&str>) -> Result<(), CliError> {
    let items = search(query.unwrap_or(""));
    if items.is_empty() {
        println!("{}", "No matching palette entries.".yellow());
        return Ok(());
    }
    for item in items {
        println!("  {} {}", format!("{:<10}", item.field_type.as_str()).cyan(), item.label);
    }
    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "formulate", "generate", "-i", "forms", "--format", "shadcn", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                input,
                format,
                dry_run,
                watch,
                ..
            } => {
                assert_eq!(input, PathBuf::from("forms"));
                assert_eq!(format, Some(FormType::Shadcn));
                assert!(dry_run);
                assert!(!watch);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_preview_values() {
        let cli = Cli::try_parse_from([
            "formulate", "preview", "-i", "f.form.json", "--value", "email=a@b.co", "--value",
            "name=", "--today", "2025-06-15",
        ])
        .unwrap();
        match cli.command {
            Commands::Preview { values, today, .. } => {
                assert_eq!(
                    values,
                    vec![
                        ("email".to_string(), "a@b.co".to_string()),
                        ("name".to_string(), String::new()),
                    ]
                );
                assert_eq!(today, NaiveDate::from_ymd_opt(2025, 6, 15));
            }
            _ => panic!("expected preview"),
        }
    }

    #[test]
    fn test_unknown_field_type_is_rejected() {
        assert!(Cli::try_parse_from(["formulate", "add", "-i", "f.json", "--type", "slider"]).is_err());
    }
}
