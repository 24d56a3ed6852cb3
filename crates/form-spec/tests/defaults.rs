use chrono::NaiveDate;
use form_spec::{
    FieldKind, FieldValue, FormConfig, default_value, default_value_for_label, default_value_on,
    today,
};

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn scalar_kinds_have_fixed_defaults() {
    assert_eq!(default_value(FieldKind::Text, None), FieldValue::Text("".into()));
    assert_eq!(default_value(FieldKind::File, None), FieldValue::Text("".into()));
    assert_eq!(default_value(FieldKind::Number, None), FieldValue::Number(0.0));
    assert_eq!(default_value(FieldKind::Checkbox, None), FieldValue::Bool(false));
}

#[test]
fn select_and_radio_take_the_first_option() {
    let choices = options(&["A", "B"]);
    assert_eq!(
        default_value(FieldKind::Select, Some(&choices)),
        FieldValue::Text("A".into())
    );
    assert_eq!(
        default_value(FieldKind::Radio, Some(&choices)),
        FieldValue::Text("A".into())
    );
}

#[test]
fn select_without_options_defaults_to_empty() {
    assert_eq!(
        default_value(FieldKind::Select, Some(&[])),
        FieldValue::Text("".into())
    );
    assert_eq!(default_value(FieldKind::Radio, None), FieldValue::Text("".into()));
}

#[test]
fn date_defaults_to_given_day() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
    assert_eq!(
        default_value_on(FieldKind::Date, None, day),
        FieldValue::Text("2024-02-29".into())
    );
}

#[test]
fn date_defaults_to_today_in_iso_form() {
    let expected = today().format("%Y-%m-%d").to_string();
    let value = default_value(FieldKind::Date, None);
    let text = value.as_str().expect("date default is text");
    assert_eq!(text.len(), 10);
    // Guard against the date rolling over between the two reads.
    assert!(text == expected || text > expected.as_str());
}

#[test]
fn unknown_label_falls_back_to_empty_string() {
    assert_eq!(
        default_value_for_label("customField", None),
        FieldValue::Text("".into())
    );
    assert_eq!(
        default_value_for_label("checkbox", None),
        FieldValue::Bool(false)
    );
}

#[test]
fn every_kind_round_trips_its_label() {
    for kind in FieldKind::ALL {
        assert_eq!(FieldKind::from_label(kind.as_str()), Some(kind));
    }
    assert_eq!(FieldKind::from_label("textarea"), None);
}

#[test]
fn camel_case_length_keys_are_accepted() {
    let config = FormConfig::from_json(include_str!("../tests/fixtures/camel_case_form.json"))
        .expect("deserialize");
    let serialized = serde_json::to_value(&config).expect("serialize");
    assert_eq!(serialized[0]["min_length"], 2);
    assert_eq!(serialized[0]["max_length"], 4);
}

#[test]
fn input_parsing_is_explicit() {
    assert_eq!(
        FieldValue::from_input(FieldKind::Number, " 42 "),
        FieldValue::Number(42.0)
    );
    assert_eq!(
        FieldValue::from_input(FieldKind::Number, "forty"),
        FieldValue::Text("forty".into())
    );
    assert_eq!(
        FieldValue::from_input(FieldKind::Checkbox, "Yes"),
        FieldValue::Bool(true)
    );
    assert_eq!(
        FieldValue::from_input(FieldKind::Date, "2024-01-01"),
        FieldValue::Text("2024-01-01".into())
    );
}
