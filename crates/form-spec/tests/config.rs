use form_spec::{
    FieldConfig, FieldKind, FieldRules, FieldValue, FormConfig, ValidatorRegistry, config_schema,
};
use serde_json::json;

#[test]
fn deserializes_every_kind() {
    let config: FormConfig = serde_json::from_value(json!([
        { "id": "a", "type": "text", "label": "A" },
        { "id": "b", "type": "number", "label": "B", "min": 1.5 },
        { "id": "c", "type": "select", "label": "C", "options": ["x"] },
        { "id": "d", "type": "checkbox", "label": "D" },
        { "id": "e", "type": "radio", "label": "E" },
        { "id": "f", "type": "file", "label": "F" },
        { "id": "g", "type": "date", "label": "G", "max": "2030-01-01" }
    ]))
    .expect("deserialize");

    let kinds: Vec<FieldKind> = config.iter().map(FieldConfig::kind).collect();
    assert_eq!(kinds, FieldKind::ALL.to_vec());
    assert_eq!(config.field("e").and_then(FieldConfig::options), Some(&[][..]));
    assert!(!config.fields[0].required);
}

#[test]
fn unknown_kind_is_rejected_by_the_closed_set() {
    let result: Result<FormConfig, _> = serde_json::from_value(json!([
        { "id": "a", "type": "color", "label": "A" }
    ]));
    assert!(result.is_err());
}

#[test]
fn serializes_with_type_tag() {
    let field = FieldConfig::new("agree", "Agree", FieldRules::Checkbox {}).required();
    let value = serde_json::to_value(&field).expect("serialize");
    assert_eq!(
        value,
        json!({ "id": "agree", "label": "Agree", "required": true, "type": "checkbox" })
    );
}

#[test]
fn field_values_use_bare_json_scalars() {
    let values: Vec<FieldValue> =
        serde_json::from_value(json!([null, true, 3, "x"])).expect("deserialize");
    assert_eq!(
        values,
        vec![
            FieldValue::Null,
            FieldValue::Bool(true),
            FieldValue::Number(3.0),
            FieldValue::Text("x".into()),
        ]
    );
}

#[test]
fn lint_reports_configuration_mistakes() {
    let config: FormConfig = serde_json::from_value(json!([
        { "id": "name", "type": "text", "label": "Name", "min_length": 5, "max_length": 2 },
        { "id": "name", "type": "text", "label": "Name again" },
        { "id": "zip", "type": "text", "label": "Zip", "pattern": "(" },
        { "id": "age", "type": "number", "label": "Age", "validate": "adult" },
        { "id": "when", "type": "date", "label": "When", "min": "01/02/2020" },
        { "id": "plan", "type": "select", "label": "Plan" }
    ]))
    .expect("deserialize");

    let issues = config.lint(&ValidatorRegistry::with_builtins());
    let codes: Vec<(&str, &str)> = issues
        .iter()
        .map(|issue| (issue.field_id.as_str(), issue.code.as_str()))
        .collect();

    assert!(codes.contains(&("name", "inverted_range")));
    assert!(codes.contains(&("name", "duplicate_id")));
    assert!(codes.contains(&("zip", "invalid_pattern")));
    assert!(codes.contains(&("age", "unknown_validator")));
    assert!(codes.contains(&("when", "invalid_date_bound")));
    assert!(codes.contains(&("plan", "no_options")));
}

#[test]
fn lint_is_quiet_for_a_clean_config() {
    let config = FormConfig::from_json(include_str!("../tests/fixtures/signup_form.json"))
        .expect("deserialize");
    assert!(config.lint(&ValidatorRegistry::with_builtins()).is_empty());
}

#[test]
fn schema_describes_config_array() {
    let schema = config_schema();
    assert_eq!(schema["type"], "array");
    let text = schema.to_string();
    assert!(text.contains("min_length"));
    assert!(text.contains("checkbox"));
}

#[test]
fn registry_lists_builtins() {
    let registry = ValidatorRegistry::with_builtins();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["email", "iso_date", "non_blank"]);
    assert_eq!(
        registry
            .get("non_blank")
            .and_then(|validator| validator.validate(&FieldValue::Text("   ".into()))),
        Some("Value cannot be blank.".to_string())
    );
    assert_eq!(
        registry
            .get("iso_date")
            .and_then(|validator| validator.validate(&FieldValue::Text("2024-13-01".into()))),
        Some("Enter a date as YYYY-MM-DD.".to_string())
    );
}
