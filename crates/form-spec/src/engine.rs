use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::defaults::{initial_errors, initial_fields, today};
use crate::spec::form::FormConfig;
use crate::validate::validate_value;
use crate::validators::ValidatorRegistry;
use crate::value::FieldValue;

pub type FieldValues = BTreeMap<String, FieldValue>;
pub type ErrorMap = BTreeMap<String, Option<String>>;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("a field with id '{0}' doesn't exist")]
    UnknownField(String),
    #[error("field '{0}' has no entry in the form state")]
    MissingState(String),
    #[error("form has {} invalid field(s)", invalid_count(.0))]
    Invalid(ErrorMap),
    #[error("failed to parse form config: {0}")]
    ConfigParse(#[source] serde_json::Error),
}

fn invalid_count(errors: &ErrorMap) -> usize {
    errors.values().filter(|error| error.is_some()).count()
}

/// Values and errors tracked for one form.
///
/// `is_valid` reflects the last [`FormBuilder::validate_form`] call only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub fields: FieldValues,
    pub errors: ErrorMap,
    pub is_valid: bool,
}

impl FormState {
    pub fn initial(config: &FormConfig, today: NaiveDate) -> Self {
        Self {
            fields: initial_fields(config, today),
            errors: initial_errors(config),
            is_valid: false,
        }
    }
}

/// Values captured from a form that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub values: FieldValues,
}

impl Submission {
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(&self.values)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.values)
    }
}

/// Form state engine over a [`FormConfig`].
///
/// Validation is pull based: values change through
/// [`set_field_value`](Self::set_field_value) without re-validating, and
/// errors are only recomputed when asked for.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    config: FormConfig,
    validators: ValidatorRegistry,
    state: FormState,
}

impl FormBuilder {
    /// Initializes state with the built-in validators available.
    pub fn new(config: FormConfig) -> Self {
        Self::with_validators(config, ValidatorRegistry::with_builtins())
    }

    pub fn with_validators(config: FormConfig, validators: ValidatorRegistry) -> Self {
        Self::initialized_on(config, validators, today())
    }

    /// Initializes state with an explicit date for date-field defaults.
    pub fn initialized_on(
        config: FormConfig,
        validators: ValidatorRegistry,
        today: NaiveDate,
    ) -> Self {
        let state = FormState::initial(&config, today);
        debug!(fields = state.fields.len(), "form state initialized");
        Self {
            config,
            validators,
            state,
        }
    }

    pub fn from_json(config_json: &str) -> Result<Self, FormError> {
        let config = FormConfig::from_json(config_json).map_err(FormError::ConfigParse)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.state.fields.get(id)
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.state.errors.get(id).and_then(|error| error.as_deref())
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid
    }

    /// Replaces the value of a known field. Unknown ids are ignored.
    ///
    /// Returns whether the value was stored.
    pub fn set_field_value(&mut self, id: &str, value: impl Into<FieldValue>) -> bool {
        match self.state.fields.get_mut(id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Validates one field, distinguishing "valid" from "could not validate".
    pub fn try_validate_field(&self, id: &str) -> Result<Option<String>, FormError> {
        let field = self
            .config
            .field(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        let value = self
            .state
            .fields
            .get(id)
            .ok_or_else(|| FormError::MissingState(id.to_string()))?;
        Ok(validate_value(field, value, &self.validators))
    }

    /// Validates one field. Faults are logged and reported as no error.
    pub fn validate_field(&self, id: &str) -> Option<String> {
        match self.try_validate_field(id) {
            Ok(result) => result,
            Err(err) => {
                error!(field = %id, error = %err, "validation error");
                None
            }
        }
    }

    /// Validates every field and replaces `errors` and `is_valid` together.
    pub fn validate_form(&mut self) -> ErrorMap {
        let errors: ErrorMap = self
            .state
            .fields
            .keys()
            .map(|id| (id.clone(), self.validate_field(id)))
            .collect();
        let is_valid = errors.values().all(Option::is_none);

        self.state.errors = errors.clone();
        self.state.is_valid = is_valid;
        debug!(is_valid, invalid = invalid_count(&errors), "form validated");
        errors
    }

    /// Validates the form and hands out the values when it is valid.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let errors = self.validate_form();
        if !self.state.is_valid {
            return Err(FormError::Invalid(errors));
        }
        let submission = Submission {
            values: self.state.fields.clone(),
        };
        info!(values = ?submission.values, "form submitted");
        Ok(submission)
    }
}
