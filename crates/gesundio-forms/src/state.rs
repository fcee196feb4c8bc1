use std::collections::BTreeMap;

use crate::error::FormError;
use crate::schema::ValidationErrors;
use crate::value::{FieldValue, PhoneNumber, UploadedFile};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub value: FieldValue,
    pub error: Option<String>,
}

/// Per-form mapping of field name to current value and validation error.
/// Owned by exactly one form session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    entries: BTreeMap<String, FieldEntry>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with its initial value. Redeclaring resets it.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.entries.insert(
            name.into(),
            FieldEntry {
                value,
                error: None,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&FieldEntry> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name).map(|e| &e.value)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.error.as_deref())
    }

    /// Change handler for a bound control. The new value must have the same
    /// shape as the declared one. Returns whether anything changed.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<bool, FormError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        if !entry.value.same_shape(&value) {
            return Err(FormError::ValueKindMismatch {
                field: name.to_string(),
                expected: entry.value.shape(),
                found: value.shape(),
            });
        }
        if entry.value == value {
            return Ok(false);
        }
        entry.value = value;
        Ok(true)
    }

    fn set_error(&mut self, name: &str, error: Option<String>) {
        if let Some(entry) = self.entries.get_mut(name)
            && entry.error != error
        {
            entry.error = error;
        }
    }

    /// Replace every field's error with the outcome of one validation pass.
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        let names: Vec<String> = self.entries.keys().cloned().collect();
        for name in names {
            let error = errors.get(&name).map(str::to_string);
            self.set_error(&name, error);
        }
    }

    pub fn clear_errors(&mut self) {
        self.apply_errors(&ValidationErrors::default());
    }

    /// Text value, or `""` when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        match self.value(name) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    /// Trimmed text, `None` when blank.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        let s = self.text(name).trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    pub fn phone(&self, name: &str) -> Option<&PhoneNumber> {
        match self.value(name) {
            Some(FieldValue::Phone(p)) => p.as_ref(),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<jiff::civil::DateTime> {
        match self.value(name) {
            Some(FieldValue::Date(d)) => *d,
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.value(name), Some(FieldValue::Bool(true)))
    }

    pub fn files(&self, name: &str) -> &[UploadedFile] {
        match self.value(name) {
            Some(FieldValue::Files(f)) => f,
            _ => &[],
        }
    }
}
