use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The closed set of form-control categories a field can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FieldKind {
    /// Single-line text box with an optional leading icon.
    Input,
    /// International phone-number control.
    PhoneInput,
    /// Calendar control, optionally with a time-of-day selector.
    DatePicker,
    /// Dropdown over caller-supplied `{value, label}` options.
    Select,
    /// Multi-line text.
    Textarea,
    /// Boolean toggle with its label rendered beside it.
    Checkbox,
    /// Composite control produced by a caller-supplied render function.
    Skeleton,
}

/// Where a field's label is drawn relative to its control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    Above,
    Adjacent,
}

impl FieldKind {
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Input,
        FieldKind::PhoneInput,
        FieldKind::DatePicker,
        FieldKind::Select,
        FieldKind::Textarea,
        FieldKind::Checkbox,
        FieldKind::Skeleton,
    ];

    /// Wire tag, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::PhoneInput => "phoneInput",
            FieldKind::DatePicker => "datePicker",
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Skeleton => "skeleton",
        }
    }

    pub fn label_position(&self) -> LabelPosition {
        match self {
            FieldKind::Checkbox => LabelPosition::Adjacent,
            _ => LabelPosition::Above,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFieldKind(s.to_string()))
    }
}
