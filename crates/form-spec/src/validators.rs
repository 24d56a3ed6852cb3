use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use crate::value::FieldValue;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Custom rule run after the built-in checks of a field.
pub trait FieldValidator: Send + Sync {
    fn validate(&self, value: &FieldValue) -> Option<String>;
}

impl<F> FieldValidator for F
where
    F: Fn(&FieldValue) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: &FieldValue) -> Option<String> {
        self(value)
    }
}

/// Named validators that field configurations refer to through `validate`.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: BTreeMap<String, Arc<dyn FieldValidator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `email`, `non_blank` and `iso_date`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("email", email);
        registry.register("non_blank", non_blank);
        registry.register("iso_date", iso_date);
        registry
    }

    /// Adds or replaces the validator stored under `name`.
    pub fn register<V>(&mut self, name: impl Into<String>, validator: V) -> &mut Self
    where
        V: FieldValidator + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FieldValidator>> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

// Built-ins leave empty values alone; the required check owns those.

fn email(value: &FieldValue) -> Option<String> {
    match value.as_str() {
        Some(text) if !text.is_empty() && !EMAIL.is_match(text) => {
            Some("Enter a valid email address.".into())
        }
        _ => None,
    }
}

fn non_blank(value: &FieldValue) -> Option<String> {
    match value.as_str() {
        Some(text) if !text.is_empty() && text.trim().is_empty() => {
            Some("Value cannot be blank.".into())
        }
        _ => None,
    }
}

fn iso_date(value: &FieldValue) -> Option<String> {
    match value.as_str() {
        Some(text) if !text.is_empty() && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() => {
            Some("Enter a date as YYYY-MM-DD.".into())
        }
        _ => None,
    }
}
