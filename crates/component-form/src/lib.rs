use std::collections::BTreeMap;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use form_spec::{
    FieldValue, FormBuilder, FormConfig, FormError, ValidatorRegistry, config_schema,
};

const DEFAULT_CONFIG: &str = include_str!("../../form-spec/tests/fixtures/signup_form.json");

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse form config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("failed to parse values: {0}")]
    ValuesParse(#[source] serde_json::Error),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

fn load_config(config_json: &str) -> Result<FormConfig, ComponentError> {
    let source = if config_json.trim().is_empty() {
        DEFAULT_CONFIG
    } else {
        config_json
    };
    FormConfig::from_json(source).map_err(ComponentError::ConfigParse)
}

fn parse_values(values_json: &str) -> Result<BTreeMap<String, FieldValue>, ComponentError> {
    if values_json.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(values_json).map_err(ComponentError::ValuesParse)
}

/// Builds a form from `config_json` and applies `values_json` on top of the defaults.
///
/// Values for ids outside the form are dropped, the same way
/// `set_field_value` drops them; their ids are returned.
fn load_form(
    config_json: &str,
    values_json: &str,
) -> Result<(FormBuilder, Vec<String>), ComponentError> {
    let config = load_config(config_json)?;
    let values = parse_values(values_json)?;
    let mut form = FormBuilder::new(config);
    let mut ignored = Vec::new();
    for (id, value) in values {
        if !form.set_field_value(&id, value) {
            debug!(field = %id, "ignoring value for unknown field");
            ignored.push(id);
        }
    }
    Ok((form, ignored))
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, ComponentError> {
    serde_json::to_value(value).map_err(ComponentError::JsonEncode)
}

/// Normalized form configuration.
pub fn describe(config_json: &str) -> String {
    respond(load_config(config_json).and_then(|config| encode(&config)))
}

/// JSON Schema for form configuration documents.
pub fn get_config_schema() -> String {
    respond(Ok(config_schema()))
}

/// Issues found in the configuration; an empty list means it is clean.
pub fn lint_config(config_json: &str) -> String {
    respond(load_config(config_json).and_then(|config| {
        let issues = config.lint(&ValidatorRegistry::with_builtins());
        encode(&issues)
    }))
}

/// Freshly initialized state: defaults, null errors, not yet valid.
pub fn initial_state(config_json: &str) -> String {
    respond(load_config(config_json).and_then(|config| {
        let form = FormBuilder::new(config);
        encode(form.state())
    }))
}

/// Runs form validation over the given values.
pub fn validate_values(config_json: &str, values_json: &str) -> String {
    respond(load_form(config_json, values_json).and_then(|(mut form, ignored)| {
        let errors = form.validate_form();
        Ok(json!({
            "valid": form.is_valid(),
            "errors": encode(&errors)?,
            "fields": encode(&form.state().fields)?,
            "ignored_fields": ignored,
        }))
    }))
}

/// Sets one value and validates only that field.
///
/// An id outside the form is ignored like any other unknown value: the
/// fields come back unchanged with a null error.
pub fn set_and_validate(
    config_json: &str,
    values_json: &str,
    field_id: &str,
    value_json: &str,
) -> String {
    respond(load_form(config_json, values_json).and_then(|(mut form, mut ignored)| {
        let value: FieldValue =
            serde_json::from_str(value_json).map_err(ComponentError::ValuesParse)?;
        let error = if form.set_field_value(field_id, value) {
            form.validate_field(field_id)
        } else {
            debug!(field = %field_id, "ignoring value for unknown field");
            ignored.push(field_id.to_string());
            None
        };
        Ok(json!({
            "field_id": field_id,
            "error": error,
            "fields": encode(&form.state().fields)?,
            "ignored_fields": ignored,
        }))
    }))
}

/// Validates and, when valid, returns the submitted values.
pub fn submit(config_json: &str, values_json: &str) -> String {
    respond(load_form(config_json, values_json).and_then(|(mut form, _)| {
        match form.submit() {
            Ok(submission) => Ok(json!({
                "status": "complete",
                "values": encode(&submission.values)?,
            })),
            Err(FormError::Invalid(errors)) => Ok(json!({
                "status": "error",
                "errors": encode(&errors)?,
            })),
            Err(other) => Ok(json!({
                "status": "error",
                "error": other.to_string(),
            })),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).expect("json")
    }

    fn valid_values() -> Value {
        json!({ "name": "John", "age": 25, "dob": "2010-01-01" })
    }

    #[test]
    fn describe_returns_default_config() {
        let config = parse(&describe(""));
        let fields = config.as_array().expect("array");
        assert_eq!(fields[0]["id"], "name");
        assert_eq!(fields[0]["type"], "text");
    }

    #[test]
    fn describe_reports_parse_errors() {
        let response = parse(&describe("[{\"id\": 1}]"));
        assert!(
            response["error"]
                .as_str()
                .unwrap_or_default()
                .starts_with("failed to parse form config")
        );
    }

    #[test]
    fn schema_is_served() {
        let schema = parse(&get_config_schema());
        assert_eq!(schema["type"], "array");
    }

    #[test]
    fn initial_state_has_defaults() {
        let state = parse(&initial_state(""));
        assert_eq!(state["fields"]["name"], "");
        assert_eq!(state["fields"]["age"], 0.0);
        assert_eq!(state["fields"]["newsletter"], false);
        assert_eq!(state["fields"]["plan"], "basic");
        assert!(state["errors"]["name"].is_null());
        assert_eq!(state["is_valid"], false);
    }

    #[test]
    fn validate_values_reports_errors() {
        let result = parse(&validate_values("", r#"{"name": "Jo"}"#));
        assert_eq!(result["valid"], false);
        assert_eq!(result["errors"]["name"], "Minimum length is 3.");
        assert_eq!(result["errors"]["age"], "Value must be at least 18.");
    }

    #[test]
    fn validate_values_accepts_complete_values() {
        let result = parse(&validate_values("", &valid_values().to_string()));
        assert_eq!(result["valid"], true);
        assert!(result["errors"]["name"].is_null());
    }

    #[test]
    fn validate_values_ignores_unknown_ids() {
        let mut values = valid_values();
        values["nickname"] = json!("Johnny");
        let result = parse(&validate_values("", &values.to_string()));
        assert_eq!(result["valid"], true);
        assert_eq!(result["ignored_fields"], json!(["nickname"]));
        assert!(result["fields"].get("nickname").is_none());
    }

    #[test]
    fn set_and_validate_checks_one_field() {
        let result = parse(&set_and_validate("", "{}", "age", "\"abc\""));
        assert_eq!(result["field_id"], "age");
        assert_eq!(result["error"], "Value must be a number.");
        assert_eq!(result["fields"]["age"], "abc");
    }

    #[test]
    fn set_and_validate_ignores_unknown_field() {
        let result = parse(&set_and_validate("", r#"{"name": "John"}"#, "nickname", "\"x\""));
        assert!(result["error"].is_null());
        assert_eq!(result["ignored_fields"], json!(["nickname"]));
        assert_eq!(result["fields"]["name"], "John");
        assert!(result["fields"].get("nickname").is_none());
    }

    #[test]
    fn submit_returns_values_when_valid() {
        let result = parse(&submit("", &valid_values().to_string()));
        assert_eq!(result["status"], "complete");
        assert_eq!(result["values"]["name"], "John");
        assert_eq!(result["values"]["newsletter"], false);
    }

    #[test]
    fn submit_returns_errors_when_invalid() {
        let result = parse(&submit("", "{}"));
        assert_eq!(result["status"], "error");
        assert_eq!(result["errors"]["name"], "This field is required.");
    }

    #[test]
    fn lint_config_lists_issues() {
        let config = json!([
            { "id": "a", "type": "text", "label": "A" },
            { "id": "a", "type": "text", "label": "A again" }
        ]);
        let issues = parse(&lint_config(&config.to_string()));
        assert_eq!(issues[0]["code"], "duplicate_id");
    }
}
