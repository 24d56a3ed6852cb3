use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of supported input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
    Checkbox,
    Radio,
    File,
    Date,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Text,
        FieldKind::Number,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Radio,
        FieldKind::File,
        FieldKind::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::File => "file",
            FieldKind::Date => "date",
        }
    }

    /// Resolves a `type` label; `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }

    /// Kinds whose default value is taken from their option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific constraints, discriminated by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldRules {
    Text {
        #[serde(default, alias = "minLength", skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, alias = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        /// Regular expression the value must match somewhere.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        #[serde(default)]
        options: Vec<String>,
    },
    Checkbox {},
    Radio {
        #[serde(default)]
        options: Vec<String>,
    },
    File {},
    /// Bounds are ISO `YYYY-MM-DD` strings compared lexically.
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

impl FieldRules {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRules::Text { .. } => FieldKind::Text,
            FieldRules::Number { .. } => FieldKind::Number,
            FieldRules::Select { .. } => FieldKind::Select,
            FieldRules::Checkbox {} => FieldKind::Checkbox,
            FieldRules::Radio { .. } => FieldKind::Radio,
            FieldRules::File {} => FieldKind::File,
            FieldRules::Date { .. } => FieldKind::Date,
        }
    }

    pub fn text() -> Self {
        FieldRules::Text {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn number() -> Self {
        FieldRules::Number {
            min: None,
            max: None,
        }
    }

    pub fn date() -> Self {
        FieldRules::Date {
            min: None,
            max: None,
        }
    }
}

/// Static description of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Name of a validator registered in the `ValidatorRegistry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,
    #[serde(flatten)]
    pub rules: FieldRules,
}

impl FieldConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>, rules: FieldRules) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            validate: None,
            rules,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>) -> Self {
        self.validate = Some(name.into());
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.rules.kind()
    }

    /// Option list for select and radio fields.
    pub fn options(&self) -> Option<&[String]> {
        match &self.rules {
            FieldRules::Select { options } | FieldRules::Radio { options } => Some(options),
            _ => None,
        }
    }
}
