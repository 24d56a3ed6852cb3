use regex::Regex;
use tracing::warn;

use crate::spec::field::{FieldConfig, FieldRules};
use crate::validators::ValidatorRegistry;
use crate::value::FieldValue;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const NOT_A_NUMBER_MESSAGE: &str = "Value must be a number.";

/// Runs the required check, the kind checks and finally the named validator.
///
/// The first rule that fires wins. A named validator is only reached when
/// every earlier check passed, and its answer is returned as-is.
pub fn validate_value(
    field: &FieldConfig,
    value: &FieldValue,
    validators: &ValidatorRegistry,
) -> Option<String> {
    if field.required && value.is_empty() {
        return Some(REQUIRED_MESSAGE.into());
    }

    if let Some(message) = check_rules(field, value) {
        return Some(message);
    }

    if let Some(name) = &field.validate {
        match validators.get(name) {
            Some(validator) => return validator.validate(value),
            None => warn!(field = %field.id, validator = %name, "validator is not registered, skipping"),
        }
    }

    None
}

fn check_rules(field: &FieldConfig, value: &FieldValue) -> Option<String> {
    match &field.rules {
        FieldRules::Text {
            min_length,
            max_length,
            pattern,
        } => check_text(value, *min_length, *max_length, pattern.as_deref()),
        FieldRules::Number { min, max } => check_number(field, value, *min, *max),
        FieldRules::Date { min, max } => {
            check_date(field, value, min.as_deref(), max.as_deref())
        }
        FieldRules::Select { .. }
        | FieldRules::Radio { .. }
        | FieldRules::Checkbox {}
        | FieldRules::File {} => None,
    }
}

fn check_text(
    value: &FieldValue,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&str>,
) -> Option<String> {
    let Some(text) = value.as_str() else {
        return Some("Invalid value type for a text field.".into());
    };
    let length = text.chars().count();

    if let Some(min) = min_length
        && length < min
    {
        return Some(format!("Minimum length is {}.", min));
    }

    if let Some(max) = max_length
        && length > max
    {
        return Some(format!("Maximum length is {}.", max));
    }

    // Patterns that fail to compile are reported by `FormConfig::lint`.
    if let Some(pattern) = pattern
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return Some("Value does not match the expected format.".into());
    }

    None
}

fn check_number(
    field: &FieldConfig,
    value: &FieldValue,
    min: Option<f64>,
    max: Option<f64>,
) -> Option<String> {
    let number = match value {
        FieldValue::Number(number) => *number,
        FieldValue::Null if !field.required => return None,
        FieldValue::Text(text) if !field.required && text.trim().is_empty() => return None,
        FieldValue::Text(text) => match parse_number(text) {
            Some(number) => number,
            None => return Some(NOT_A_NUMBER_MESSAGE.into()),
        },
        FieldValue::Null | FieldValue::Bool(_) => return Some(NOT_A_NUMBER_MESSAGE.into()),
    };

    if !number.is_finite() {
        return Some(NOT_A_NUMBER_MESSAGE.into());
    }

    if let Some(min) = min
        && number < min
    {
        return Some(format!("Value must be at least {}.", min));
    }

    if let Some(max) = max
        && number > max
    {
        return Some(format!("Value must not exceed {}.", max));
    }

    None
}

/// Explicit numeric parse; `None` means "not a number" rather than zero.
///
/// Infinities and overflowing literals such as `1e400` are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn check_date(
    field: &FieldConfig,
    value: &FieldValue,
    min: Option<&str>,
    max: Option<&str>,
) -> Option<String> {
    let date = match value {
        FieldValue::Text(date) => date.as_str(),
        FieldValue::Null if !field.required => return None,
        _ => return Some("Invalid value type for a date field.".into()),
    };

    // ISO dates order the same way lexically and chronologically.
    if let Some(min) = min
        && date < min
    {
        return Some(format!("Value must be at least {}.", min));
    }

    if let Some(max) = max
        && date > max
    {
        return Some(format!("Value must not exceed {}.", max));
    }

    None
}
