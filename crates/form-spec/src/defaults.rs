use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::spec::field::FieldKind;
use crate::spec::form::FormConfig;
use crate::value::FieldValue;

/// Current UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Initial value for a field of `kind`; date fields start at today's UTC date.
pub fn default_value(kind: FieldKind, options: Option<&[String]>) -> FieldValue {
    default_value_on(kind, options, today())
}

/// Same as [`default_value`] with an explicit "today".
pub fn default_value_on(kind: FieldKind, options: Option<&[String]>, today: NaiveDate) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::File => FieldValue::Text(String::new()),
        FieldKind::Number => FieldValue::Number(0.0),
        FieldKind::Checkbox => FieldValue::Bool(false),
        FieldKind::Select | FieldKind::Radio => FieldValue::Text(
            options
                .and_then(|options| options.first())
                .cloned()
                .unwrap_or_default(),
        ),
        FieldKind::Date => FieldValue::Text(today.format("%Y-%m-%d").to_string()),
    }
}

/// Resolves by `type` label, falling back to an empty string for unknown labels.
pub fn default_value_for_label(label: &str, options: Option<&[String]>) -> FieldValue {
    match FieldKind::from_label(label) {
        Some(kind) => default_value(kind, options),
        None => FieldValue::Text(String::new()),
    }
}

pub fn initial_fields(config: &FormConfig, today: NaiveDate) -> BTreeMap<String, FieldValue> {
    config
        .iter()
        .map(|field| {
            (
                field.id.clone(),
                default_value_on(field.kind(), field.options(), today),
            )
        })
        .collect()
}

pub fn initial_errors(config: &FormConfig) -> BTreeMap<String, Option<String>> {
    config.iter().map(|field| (field.id.clone(), None)).collect()
}
