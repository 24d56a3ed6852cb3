#![allow(missing_docs)]

pub mod defaults;
pub mod engine;
pub mod spec;
pub mod validate;
pub mod validators;
pub mod value;

pub use defaults::{default_value, default_value_for_label, default_value_on, today};
pub use engine::{ErrorMap, FieldValues, FormBuilder, FormError, FormState, Submission};
pub use spec::{ConfigIssue, FieldConfig, FieldKind, FieldRules, FormConfig};
pub use validate::{REQUIRED_MESSAGE, validate_value};
pub use validators::{FieldValidator, ValidatorRegistry};
pub use value::FieldValue;

/// JSON Schema describing a form configuration file.
pub fn config_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(FormConfig)).unwrap_or_default()
}
