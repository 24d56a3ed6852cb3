use std::collections::BTreeSet;

use chrono::NaiveDate;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::{FieldConfig, FieldRules};
use crate::validators::ValidatorRegistry;

/// Ordered list of field configurations.
///
/// Ids are expected to be unique but this is not enforced: a repeated id
/// shares one state entry (the later default wins) while config lookups
/// resolve to the first declaration. [`FormConfig::lint`] reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FormConfig {
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    pub fn new(fields: Vec<FieldConfig>) -> Self {
        Self { fields }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// First field declared with `id`.
    pub fn field(&self, id: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reports configuration mistakes without rejecting the config.
    pub fn lint(&self, validators: &ValidatorRegistry) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut seen = BTreeSet::new();

        for field in &self.fields {
            if field.id.trim().is_empty() {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "empty_id",
                    format!("field '{}' has an empty id", field.label),
                ));
            }
            if !seen.insert(field.id.as_str()) {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "duplicate_id",
                    format!("id '{}' is declared more than once", field.id),
                ));
            }
            if let Some(name) = &field.validate
                && !validators.contains(name)
            {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "unknown_validator",
                    format!("validator '{}' is not registered", name),
                ));
            }
            lint_rules(field, &mut issues);
        }

        issues
    }
}

impl From<Vec<FieldConfig>> for FormConfig {
    fn from(fields: Vec<FieldConfig>) -> Self {
        Self::new(fields)
    }
}

fn lint_rules(field: &FieldConfig, issues: &mut Vec<ConfigIssue>) {
    match &field.rules {
        FieldRules::Text {
            min_length,
            max_length,
            pattern,
        } => {
            if let (Some(min), Some(max)) = (min_length, max_length)
                && min > max
            {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "inverted_range",
                    format!("min_length {} exceeds max_length {}", min, max),
                ));
            }
            if let Some(pattern) = pattern
                && let Err(err) = Regex::new(pattern)
            {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "invalid_pattern",
                    format!("pattern does not compile: {}", err),
                ));
            }
        }
        FieldRules::Number { min, max } => {
            if let (Some(min), Some(max)) = (min, max)
                && min > max
            {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "inverted_range",
                    format!("min {} exceeds max {}", min, max),
                ));
            }
        }
        FieldRules::Date { min, max } => {
            for bound in [min, max].into_iter().flatten() {
                if NaiveDate::parse_from_str(bound, "%Y-%m-%d").is_err() {
                    issues.push(ConfigIssue::new(
                        &field.id,
                        "invalid_date_bound",
                        format!("'{}' is not a YYYY-MM-DD date", bound),
                    ));
                }
            }
            if let (Some(min), Some(max)) = (min, max)
                && min > max
            {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "inverted_range",
                    format!("min {} is after max {}", min, max),
                ));
            }
        }
        FieldRules::Select { options } | FieldRules::Radio { options } => {
            if options.is_empty() {
                issues.push(ConfigIssue::new(
                    &field.id,
                    "no_options",
                    format!("{} field has no options", field.kind()),
                ));
            }
        }
        FieldRules::Checkbox {} | FieldRules::File {} => {}
    }
}

/// Single finding produced by [`FormConfig::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub field_id: String,
    pub code: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field_id: &str, code: &str, message: String) -> Self {
        Self {
            field_id: field_id.to_string(),
            code: code.to_string(),
            message,
        }
    }
}
