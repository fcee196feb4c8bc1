//! Decoding submitted JSON into typed field values.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;

use gesundio_core::field_kind::FieldKind;

use crate::binder::FormItem;
use crate::date_format;
use crate::error::FormError;
use crate::field::FieldConfig;
use crate::state::FormState;
use crate::value::{FieldValue, PhoneNumber, UploadedFile};
use crate::FormDefinition;

/// A file as sent over the wire, content base64-encoded.
#[derive(Debug, Deserialize)]
struct FilePart {
    name: String,
    content_type: String,
    content: String,
}

fn malformed(field: &str, reason: impl Into<String>) -> FormError {
    FormError::MalformedValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn text(field: &str, json: &Value) -> Result<String, FormError> {
    match json {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(malformed(field, "expected a string")),
    }
}

fn date(config: &FieldConfig, json: &Value) -> Result<Option<jiff::civil::DateTime>, FormError> {
    let input = match json {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim(),
        _ => return Err(malformed(&config.name, "expected a date string")),
    };

    let format =
        date_format::effective_format(config.date_format.as_deref(), config.show_time_select);
    if let Some(parsed) = date_format::parse(input, &format) {
        return Ok(Some(parsed));
    }
    if let Ok(dt) = input.parse::<jiff::civil::DateTime>() {
        return Ok(Some(dt));
    }
    if let Ok(d) = input.parse::<jiff::civil::Date>() {
        return Ok(Some(d.to_datetime(jiff::civil::Time::midnight())));
    }
    Err(malformed(
        &config.name,
        format!("'{input}' does not match {format} or an ISO 8601 date"),
    ))
}

fn files(field: &str, json: &Value) -> Result<Vec<UploadedFile>, FormError> {
    if json.is_null() {
        return Ok(Vec::new());
    }
    let parts: Vec<FilePart> = serde_json::from_value(json.clone())
        .map_err(|e| malformed(field, format!("expected a file list: {e}")))?;

    parts
        .into_iter()
        .map(|part| {
            let bytes = STANDARD
                .decode(part.content.as_bytes())
                .map_err(|e| malformed(field, format!("file '{}': {e}", part.name)))?;
            Ok(UploadedFile {
                name: part.name,
                content_type: part.content_type,
                bytes,
            })
        })
        .collect()
}

/// Decode one field's JSON according to the field's kind.
pub fn field_value(config: &FieldConfig, json: &Value) -> Result<FieldValue, FormError> {
    let name = config.name.as_str();
    let value = match config.kind {
        FieldKind::Input | FieldKind::Select | FieldKind::Textarea => {
            FieldValue::Text(text(name, json)?)
        }
        FieldKind::PhoneInput => {
            FieldValue::Phone(PhoneNumber::normalize(&text(name, json)?, config.default_region))
        }
        FieldKind::DatePicker => FieldValue::Date(date(config, json)?),
        FieldKind::Checkbox => match json {
            Value::Null => FieldValue::Bool(false),
            Value::Bool(b) => FieldValue::Bool(*b),
            _ => return Err(malformed(name, "expected a boolean")),
        },
        FieldKind::Skeleton => FieldValue::Files(files(name, json)?),
    };
    Ok(value)
}

pub fn item_value(item: &FormItem, json: &Value) -> Result<FieldValue, FormError> {
    match item {
        FormItem::Field(config) => field_value(config, json),
        FormItem::Radio(group) => Ok(FieldValue::Text(text(&group.name, json)?)),
    }
}

/// Start from the form's defaults and overlay every submitted field.
/// Unknown names are rejected.
pub fn submission<F: FormDefinition + ?Sized>(
    form: &F,
    body: &serde_json::Map<String, Value>,
) -> Result<FormState, FormError> {
    let mut state = form.default_state();
    let items = form.items();

    for (name, json) in body {
        let item = items
            .iter()
            .find(|i| i.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.clone()))?;
        state.set_value(name, item_value(item, json)?)?;
    }

    Ok(state)
}
