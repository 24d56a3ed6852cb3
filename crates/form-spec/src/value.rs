use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FieldKind;

/// Current value of a field. Serialized as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty string and null count as "no value"; `0` and `false` do not.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Converts raw user input for a field of `kind`.
    ///
    /// Number input that does not parse is kept as text so validation can
    /// report it instead of silently turning it into zero.
    pub fn from_input(kind: FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Checkbox => match raw.trim().to_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" | "on" => FieldValue::Bool(true),
                "false" | "f" | "no" | "n" | "0" | "off" | "" => FieldValue::Bool(false),
                _ => FieldValue::Text(raw.to_string()),
            },
            FieldKind::Number => {
                let trimmed = raw.trim();
                match trimmed.parse::<f64>() {
                    Ok(number) if number.is_finite() => FieldValue::Number(number),
                    _ => FieldValue::Text(trimmed.to_string()),
                }
            }
            FieldKind::Text
            | FieldKind::Select
            | FieldKind::Radio
            | FieldKind::File
            | FieldKind::Date => FieldValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(flag) => write!(f, "{}", flag),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}
