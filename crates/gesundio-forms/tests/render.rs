use gesundio_core::field_kind::FieldKind;
use gesundio_forms::binder::{self, BoundControl, BoundField, FormItem};
use gesundio_forms::error::FormError;
use gesundio_forms::field::{CustomControl, FieldConfig, SelectOption};
use gesundio_forms::render::{Control, file_uploader, render};
use gesundio_forms::state::FormState;
use gesundio_forms::value::{FieldValue, PhoneNumber, Region};

fn config_for(kind: FieldKind) -> FieldConfig {
    let config = FieldConfig::new(kind, format!("{kind}_field")).label("Label");
    match kind {
        FieldKind::Skeleton => {
            let mut config = config;
            config.skeleton = Some(std::sync::Arc::new(|_: &FieldValue| CustomControl {
                widget: "uploader".to_string(),
                props: serde_json::Value::Null,
            }));
            config
        }
        _ => config,
    }
}

#[test]
fn every_kind_renders_one_control_bound_to_its_name() {
    for kind in FieldKind::ALL {
        let config = config_for(kind);
        let control = render(&config, &config.empty_value()).unwrap();
        assert_eq!(control.kind(), kind);
        assert_eq!(control.name(), config.name);
    }
}

#[test]
fn unrecognized_kind_tag_is_a_configuration_error() {
    let err = FieldConfig::parse("radio", "gender").unwrap_err();
    assert!(matches!(err, FormError::Core(_)));
    assert!(FieldConfig::parse("datePicker", "birthDate").is_ok());
}

#[test]
fn skeleton_without_render_function_fails() {
    let config = FieldConfig::new(FieldKind::Skeleton, "identificationDocument");
    let err = render(&config, &config.empty_value()).unwrap_err();
    assert!(matches!(err, FormError::MissingSkeletonRenderer(ref n) if n == "identificationDocument"));
}

#[test]
fn value_of_the_wrong_shape_is_rejected() {
    let config = FieldConfig::checkbox("privacyConsent");
    let err = render(&config, &FieldValue::Text("yes".to_string())).unwrap_err();
    assert!(matches!(
        err,
        FormError::ValueKindMismatch { expected: "boolean", found: "text", .. }
    ));
}

#[test]
fn skeleton_receives_the_bound_value() {
    let config = FieldConfig::skeleton("doc", |value: &FieldValue| CustomControl {
        widget: "echo".to_string(),
        props: serde_json::json!({ "empty": value.is_empty() }),
    });
    let control = render(&config, &FieldValue::Files(Vec::new())).unwrap();
    let Control::Custom { custom, .. } = control else {
        panic!("expected custom control");
    };
    assert_eq!(custom.props["empty"], true);
}

#[test]
fn custom_control_serializes_tag_next_to_widget() {
    let config = FieldConfig::skeleton("identificationDocument", file_uploader);
    let control = render(&config, &FieldValue::Files(Vec::new())).unwrap();
    let json = serde_json::to_value(&control).unwrap();
    assert_eq!(json["control"], "custom");
    assert_eq!(json["name"], "identificationDocument");
    assert_eq!(json["widget"], "file_uploader");
    assert_eq!(json["props"]["multiple"], false);
}

#[test]
fn date_picker_defaults_format_and_formats_display() {
    let config = FieldConfig::date_picker("birthDate");
    let value = FieldValue::Date(Some(jiff::civil::date(1990, 4, 15).at(0, 0, 0, 0)));
    let Control::DatePicker { date_format, display, show_time_select, .. } =
        render(&config, &value).unwrap()
    else {
        panic!("expected date picker");
    };
    assert_eq!(date_format, "MM/dd/yyyy");
    assert_eq!(display.as_deref(), Some("04/15/1990"));
    assert!(!show_time_select);
}

#[test]
fn date_picker_with_time_selector_extends_format() {
    let config = FieldConfig::date_picker("schedule").show_time_select(true);
    let Control::DatePicker { date_format, .. } =
        render(&config, &FieldValue::Date(None)).unwrap()
    else {
        panic!("expected date picker");
    };
    assert_eq!(date_format, "MM/dd/yyyy h:mm aa");
}

#[test]
fn select_carries_explicit_options() {
    let config = FieldConfig::select(
        "primaryPhysician",
        vec![SelectOption::plain("John Green"), SelectOption::new("lc", "Leila Cameron")],
    );
    let Control::Select { options, .. } = render(&config, &config.empty_value()).unwrap() else {
        panic!("expected select");
    };
    assert_eq!(options.len(), 2);
    assert_eq!(options[1].label, "Leila Cameron");
}

#[test]
fn textarea_respects_disabled_flag() {
    let config = FieldConfig::textarea("notes").disabled(true);
    let Control::Textarea { disabled, .. } = render(&config, &config.empty_value()).unwrap() else {
        panic!("expected textarea");
    };
    assert!(disabled);
}

#[test]
fn phone_normalization_uses_region_code() {
    let de = |s| PhoneNumber::normalize(s, Region::De).map(|p| p.as_str().to_string());
    assert_eq!(de("0176 000 000 00").as_deref(), Some("+4917600000000"));
    assert_eq!(de("(+49) 176-00000000").as_deref(), Some("+4917600000000"));
    assert_eq!(de("0049 176 00000000").as_deref(), Some("+4917600000000"));
    assert_eq!(de("   "), None);
    assert_eq!(
        PhoneNumber::normalize("0171 2345678", Region::At).unwrap().as_str(),
        "+431712345678"
    );
}

#[test]
fn binder_puts_checkbox_label_beside_the_control() {
    let item: FormItem = FieldConfig::checkbox("privacyConsent").label("I agree").into();
    let mut state = FormState::new();
    state.insert("privacyConsent", FieldValue::Bool(false));

    let rendered = binder::bind(&item, &state).unwrap();
    assert_eq!(rendered.label, None);
    let BoundControl::Field(Control::Checkbox { label, .. }) = rendered.control else {
        panic!("expected checkbox");
    };
    assert_eq!(label.as_deref(), Some("I agree"));
}

#[test]
fn binder_surfaces_label_and_validation_message() {
    let item: FormItem = FieldConfig::input("name").label("Full name").into();
    let mut state = FormState::new();
    state.insert("name", FieldValue::Text(String::new()));
    let mut errors = gesundio_forms::schema::ValidationErrors::default();
    errors.insert("name", "Name must be at least 2 characters");
    state.apply_errors(&errors);

    let rendered = binder::bind(&item, &state).unwrap();
    assert_eq!(rendered.label.as_deref(), Some("Full name"));
    assert_eq!(
        rendered.message.as_deref(),
        Some("Name must be at least 2 characters")
    );
}

#[test]
fn bound_field_rerenders_only_on_change() {
    let mut state = FormState::new();
    state.insert("name", FieldValue::Text(String::new()));
    let mut field = BoundField::new(FieldConfig::input("name").into());

    assert!(field.refresh(&state).unwrap().is_some());
    assert!(field.refresh(&state).unwrap().is_none());

    // Same value again is not a change.
    assert!(!state.set_value("name", FieldValue::Text(String::new())).unwrap());
    assert!(field.refresh(&state).unwrap().is_none());

    assert!(state.set_value("name", FieldValue::Text("Ada".to_string())).unwrap());
    assert!(field.refresh(&state).unwrap().is_some());

    let mut errors = gesundio_forms::schema::ValidationErrors::default();
    errors.insert("name", "too short");
    state.apply_errors(&errors);
    assert!(field.refresh(&state).unwrap().is_some());
    assert!(field.refresh(&state).unwrap().is_none());
}

#[test]
fn bound_field_rerenders_against_a_replaced_state() {
    let mut first = FormState::new();
    first.insert("name", FieldValue::Text("Ada".to_string()));
    let mut field = BoundField::new(FieldConfig::input("name").into());
    assert!(field.refresh(&first).unwrap().is_some());

    // A fresh state with one edit, as after a session's state is swapped out.
    let mut second = FormState::new();
    second.insert("name", FieldValue::Text(String::new()));
    second.set_value("name", FieldValue::Text("Grace".to_string())).unwrap();

    let rendered = field.refresh(&second).unwrap().expect("value changed");
    let BoundControl::Field(Control::TextInput { value, .. }) = rendered.control else {
        panic!("expected text input");
    };
    assert_eq!(value, "Grace");

    let mut identical = FormState::new();
    identical.insert("name", FieldValue::Text("Grace".to_string()));
    assert!(field.refresh(&identical).unwrap().is_none());
}

#[test]
fn state_rejects_unknown_fields_and_shape_changes() {
    let mut state = FormState::new();
    state.insert("phone", FieldValue::Phone(None));

    assert!(matches!(
        state.set_value("fax", FieldValue::Text(String::new())),
        Err(FormError::UnknownField(_))
    ));
    assert!(matches!(
        state.set_value("phone", FieldValue::Text("+49".to_string())),
        Err(FormError::ValueKindMismatch { .. })
    ));
}
