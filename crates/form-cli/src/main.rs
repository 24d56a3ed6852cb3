mod quiz;
mod wizard;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use component_form::{get_config_schema, initial_state, validate_values};
use form_spec::{FieldValue, FormBuilder, FormConfig, FormError, ValidatorRegistry};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tree_match::{HttpTransport, TransportConfig, TreeMatchSession};
use wizard::{PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Dynamic form and tree-match quiz CLI",
    long_about = "Checks form configurations, validates values, fills forms interactively and walks tree-match quizzes"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report configuration mistakes such as duplicate ids or unknown validators.
    Check {
        /// Path to the form configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: PathBuf,
    },
    /// Print the initial form state for a configuration.
    Defaults {
        /// Path to the form configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: PathBuf,
    },
    /// Validate a JSON object of field values against a configuration.
    Validate {
        /// Path to the form configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: PathBuf,
        /// Path to the values JSON file.
        #[arg(long, value_name = "VALUES")]
        values: PathBuf,
    },
    /// Fill a form interactively and submit it.
    Fill {
        /// Path to the form configuration JSON.
        #[arg(long, value_name = "CONFIG")]
        config: PathBuf,
        /// Optional JSON file with starting values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Also print the submitted values as JSON.
        #[arg(long)]
        values_json: bool,
    },
    /// Print the JSON Schema of form configuration files.
    Schema,
    /// Walk a tree-match quiz served over HTTP.
    Quiz {
        /// Base URL exposing the `begin` and `answer` endpoints.
        #[arg(long, env = "DYNAFORM_QUIZ_URL", value_name = "URL")]
        base_url: String,
        /// Request timeout in seconds.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Check { config } => run_check(config),
        Command::Defaults { config } => run_defaults(config),
        Command::Validate { config, values } => run_validate(config, values),
        Command::Fill {
            config,
            values,
            values_json,
        } => run_fill(config, values, values_json, cli.verbose),
        Command::Schema => run_schema(),
        Command::Quiz { base_url, timeout } => run_quiz(base_url, timeout),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(path: &PathBuf) -> CliResult<FormConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(FormConfig::from_json(&contents)?)
}

fn run_check(config_path: PathBuf) -> CliResult<()> {
    let config = load_config(&config_path)?;
    let issues = config.lint(&ValidatorRegistry::with_builtins());
    if issues.is_empty() {
        println!("Config OK: {} field(s)", config.len());
        return Ok(());
    }
    println!("Config issues:");
    for issue in &issues {
        println!("  {} [{}] {}", issue.field_id, issue.code, issue.message);
    }
    Err(format!("{} issue(s) found", issues.len()).into())
}

fn run_defaults(config_path: PathBuf) -> CliResult<()> {
    let config_json = fs::read_to_string(config_path)?;
    let state = parse_component_result(&initial_state(&config_json))?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn run_schema() -> CliResult<()> {
    let schema = parse_component_result(&get_config_schema())?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_validate(config_path: PathBuf, values_path: PathBuf) -> CliResult<()> {
    let config_json = fs::read_to_string(config_path)?;
    let values_json = fs::read_to_string(values_path)?;
    let result = parse_component_result(&validate_values(&config_json, &values_json))?;

    let valid = result["valid"].as_bool().unwrap_or(false);
    println!(
        "Validation result: {}",
        if valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &Value) {
    let errors = result["errors"]
        .as_object()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|(id, message)| message.as_str().map(|message| (id, message)))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if !errors.is_empty() {
        println!("Errors:");
        for (id, message) in errors {
            println!("  {} - {}", id, message);
        }
    }
    let ignored = result["ignored_fields"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();
    if !ignored.is_empty() {
        println!("Ignored unknown fields: {}", ignored.join(", "));
    }
}

fn parse_component_result(response: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(response)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        Err(error.into())
    } else {
        Ok(value)
    }
}

fn run_fill(
    config_path: PathBuf,
    values_path: Option<PathBuf>,
    values_json: bool,
    verbose: bool,
) -> CliResult<()> {
    let config = load_config(&config_path)?;
    let mut form = FormBuilder::new(config.clone());

    if let Some(path) = values_path {
        let contents = fs::read_to_string(path)?;
        let values: BTreeMap<String, FieldValue> = serde_json::from_str(&contents)?;
        for (id, value) in values {
            if !form.set_field_value(&id, value) {
                debug!(field = %id, "ignoring starting value for unknown field");
            }
        }
    }

    let presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), values_json);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut pending: Vec<&str> = Vec::new();
    for field in config.iter() {
        if !pending.contains(&field.id.as_str()) {
            pending.push(&field.id);
        }
    }
    presenter.show_header(pending.len());

    loop {
        let total = pending.len();
        for (index, id) in pending.iter().enumerate() {
            let Some(field) = config.field(id) else {
                continue;
            };
            let prompt = PromptContext::new(field, form.value(id), index + 1, total);
            presenter.show_prompt(&prompt);
            print!("> ");
            io::stdout().flush()?;

            let raw = read_line(&mut input)?.ok_or("input closed before the form was complete")?;
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("exit") {
                return Err("form aborted by user".into());
            }
            if !trimmed.is_empty() {
                form.set_field_value(id, FieldValue::from_input(field.kind(), trimmed));
            }
        }

        match form.submit() {
            Ok(submission) => {
                presenter.show_completion(&submission);
                return Ok(());
            }
            Err(FormError::Invalid(errors)) => {
                presenter.show_errors(&errors);
                pending.retain(|id| errors.get(*id).is_some_and(Option::is_some));
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn run_quiz(base_url: String, timeout: u64) -> CliResult<()> {
    let config = TransportConfig::new(base_url).with_timeout(Duration::from_secs(timeout));
    let transport = HttpTransport::new(config)?;
    let mut session = TreeMatchSession::start(transport);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    quiz::run_quiz(&mut session, &mut input)
}

/// Reads one line without its terminator; `None` once input is exhausted.
fn read_line(input: &mut impl BufRead) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
