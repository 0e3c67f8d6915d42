//! Command-line front end over JSON form definitions, submissions and records

use crate::config::FormConfig;
use crate::fields::{FieldContext, FieldView};
use crate::form::{Form, FormDefinition};
use crate::i18n::{CatalogTranslator, DefaultTranslator, Translator};
use crate::record::MemoryRecord;
use crate::transform::{TransformRegistry, Transformation};
use crate::validation::ValidationResult;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "formfields")]
#[command(version)]
#[command(about = "Validate, save and render forms described in JSON")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct FormInputs {
    /// Form definition (JSON)
    #[arg(long)]
    pub form: PathBuf,

    /// Submitted request data (JSON object)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Record to load values from (JSON)
    #[arg(long)]
    pub record: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a submission and print the messages
    Validate {
        #[command(flatten)]
        inputs: FormInputs,
    },
    /// Validate a submission and, when valid, save it into the record
    Save {
        #[command(flatten)]
        inputs: FormInputs,
        /// Where to write the updated record (defaults to --record)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print render data of the read-only form
    Readonly {
        #[command(flatten)]
        inputs: FormInputs,
    },
    /// Print render data of the form
    Render {
        #[command(flatten)]
        inputs: FormInputs,
        /// Render every field disabled
        #[arg(long)]
        disabled: bool,
    },
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    form: &'a str,
    fields: Vec<FieldView>,
}

/// Load the configuration an invocation runs with
pub fn load_config(path: Option<&Path>) -> Result<FormConfig> {
    match path {
        Some(path) => FormConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => FormConfig::load().context("Failed to load user config"),
    }
}

/// Translator configured by `config`
pub fn load_translator(config: &FormConfig) -> Result<Box<dyn Translator>> {
    match config.translations_file() {
        Some(path) => {
            let catalog = CatalogTranslator::load(&path).with_context(|| {
                format!("Failed to load translations from {}", path.display())
            })?;
            tracing::debug!(
                "Loaded {} {} translations",
                catalog.len(),
                config.locale()
            );
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(DefaultTranslator)),
    }
}

/// Run a parsed command, writing JSON to `out`; returns the exit code
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    let translator = load_translator(&config)?;
    let ctx = FieldContext::new(&config, translator.as_ref());

    match cli.command {
        Commands::Validate { inputs } => {
            let (form, _) = prepare(&inputs, &ctx)?;
            let result = form.validate(&ctx);
            write_json(out, &ValidationReport {
                valid: result.is_valid(),
                result: &result,
            })?;
            Ok(exit_code(&result))
        }
        Commands::Save { inputs, output } => {
            let (form, mut record) = prepare(&inputs, &ctx)?;
            let result = form.validate(&ctx);
            if !result.is_valid() {
                write_json(out, &ValidationReport {
                    valid: false,
                    result: &result,
                })?;
                return Ok(exit_code(&result));
            }
            form.save_into(&mut record)
                .with_context(|| format!("Failed to save form '{}'", form.name()))?;
            let target = output.as_ref().or(inputs.record.as_ref());
            match target {
                Some(path) => {
                    record
                        .save(path)
                        .with_context(|| format!("Failed to write record {}", path.display()))?;
                    tracing::info!("Saved form '{}' into {}", form.name(), path.display());
                }
                None => tracing::debug!("No record path given; printing record only"),
            }
            write_json(out, &record)?;
            Ok(0)
        }
        Commands::Readonly { inputs } => {
            let (form, _) = prepare(&inputs, &ctx)?;
            let readonly = form.transform(&TransformRegistry::default(), Transformation::Readonly, &ctx)?;
            render(out, &readonly, &ctx)?;
            Ok(0)
        }
        Commands::Render { inputs, disabled } => {
            let (mut form, _) = prepare(&inputs, &ctx)?;
            if disabled {
                form = form.transform(&TransformRegistry::default(), Transformation::Disabled, &ctx)?;
            }
            render(out, &form, &ctx)?;
            Ok(0)
        }
    }
}

/// Build the form, load the record into it, then apply the submission
fn prepare(inputs: &FormInputs, ctx: &FieldContext<'_>) -> Result<(Form, MemoryRecord)> {
    let definition = FormDefinition::load(&inputs.form)
        .with_context(|| format!("Failed to load form {}", inputs.form.display()))?;
    let mut form = definition.build().context("Invalid form definition")?;

    let record = match &inputs.record {
        Some(path) if path.exists() => MemoryRecord::load(path)
            .with_context(|| format!("Failed to load record {}", path.display()))?,
        _ => MemoryRecord::new(),
    };
    form.load_from_record(&record, ctx);

    if let Some(path) = &inputs.data {
        let submission = read_submission(path)?;
        form.load_submission(&submission, ctx);
    }
    Ok((form, record))
}

fn read_submission(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read submission {}", path.display()))?;
    match serde_json::from_str::<Value>(&contents)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("Submission {} must be a JSON object", path.display()),
    }
}

fn render(out: &mut dyn Write, form: &Form, ctx: &FieldContext<'_>) -> Result<()> {
    write_json(out, &RenderReport {
        form: form.name(),
        fields: form.views(ctx),
    })
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn exit_code(result: &ValidationResult) -> i32 {
    if result.is_valid() {
        0
    } else {
        1
    }
}
