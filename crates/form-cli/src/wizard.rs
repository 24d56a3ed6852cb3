use std::fmt::Write;

use form_spec::{ErrorMap, FieldConfig, FieldKind, FieldValue, Submission};

/// Controls which bits of state the form wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Prompts and errors only.
    Clean,
    /// Also prints current values and the submitted JSON.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts, validation errors and the final submission.
pub struct WizardPresenter {
    verbosity: Verbosity,
    show_values_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_values_json: bool) -> Self {
        Self {
            verbosity,
            show_values_json,
        }
    }

    pub fn show_header(&self, field_count: usize) {
        println!("Form: {} field(s)", field_count);
        if self.verbosity.is_verbose() {
            println!("Press enter to keep the current value, type 'exit' to abort.");
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        if !prompt.current.is_empty() {
            line.push_str(&format!(" [{}]", prompt.current));
        }
        println!("{}", line);
    }

    pub fn show_errors(&self, errors: &ErrorMap) {
        eprintln!("Please fix the following fields:");
        for (id, message) in errors {
            if let Some(message) = message {
                eprintln!("  {} - {}", id, message);
            }
        }
    }

    pub fn show_completion(&self, submission: &Submission) {
        println!("Done ✅");
        match submission.to_cbor() {
            Ok(bytes) => println!("Values (CBOR hex): {}", encode_hex(&bytes)),
            Err(err) => eprintln!("Failed to serialize values to CBOR: {}", err),
        }
        if self.show_values_json || self.verbosity.is_verbose() {
            match submission.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => eprintln!("Failed to serialize values to JSON: {}", err),
            }
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub current: String,
}

impl PromptContext {
    pub fn new(field: &FieldConfig, current: Option<&FieldValue>, index: usize, total: usize) -> Self {
        let current = match current {
            Some(FieldValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        };
        Self {
            index,
            total,
            label: field.label.clone(),
            required: field.required,
            hint: hint(field),
            current,
        }
    }
}

fn hint(field: &FieldConfig) -> Option<String> {
    match field.kind() {
        FieldKind::Checkbox => Some("(yes/no)".to_string()),
        FieldKind::Number => Some("(number)".to_string()),
        FieldKind::Date => Some("(YYYY-MM-DD)".to_string()),
        FieldKind::File => Some("(path)".to_string()),
        FieldKind::Select | FieldKind::Radio => field
            .options()
            .filter(|options| !options.is_empty())
            .map(|options| format!("({})", options.join("/"))),
        FieldKind::Text => None,
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
