pub mod field;
pub mod form;

pub use field::{FieldConfig, FieldKind, FieldRules};
pub use form::{ConfigIssue, FormConfig};
