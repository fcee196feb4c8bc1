use serde::Serialize;

use gesundio_core::field_kind::FieldKind;

use crate::date_format;
use crate::error::FormError;
use crate::field::{CustomControl, FieldConfig, Icon, SelectOption};
use crate::value::{FieldValue, PhoneNumber, Region, UploadedFile};

const CALENDAR_ICON: &str = "/assets/icons/calendar.svg";

/// Exactly one input control, bound to one field name and its current value.
///
/// `name` is the change binding: a control's new value is written back with
/// [`FormState::set_value`](crate::state::FormState::set_value) under that name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextInput {
        name: String,
        value: String,
        placeholder: Option<String>,
        icon: Option<Icon>,
    },
    PhoneInput {
        name: String,
        value: Option<PhoneNumber>,
        placeholder: Option<String>,
        default_region: Region,
    },
    DatePicker {
        name: String,
        value: Option<jiff::civil::DateTime>,
        display: Option<String>,
        date_format: String,
        show_time_select: bool,
        icon: Icon,
    },
    Select {
        name: String,
        value: String,
        placeholder: Option<String>,
        options: Vec<SelectOption>,
    },
    Textarea {
        name: String,
        value: String,
        placeholder: Option<String>,
        disabled: bool,
    },
    Checkbox {
        name: String,
        checked: bool,
        label: Option<String>,
    },
    Custom {
        name: String,
        #[serde(flatten)]
        custom: CustomControl,
    },
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::TextInput { name, .. }
            | Control::PhoneInput { name, .. }
            | Control::DatePicker { name, .. }
            | Control::Select { name, .. }
            | Control::Textarea { name, .. }
            | Control::Checkbox { name, .. }
            | Control::Custom { name, .. } => name,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Control::TextInput { .. } => FieldKind::Input,
            Control::PhoneInput { .. } => FieldKind::PhoneInput,
            Control::DatePicker { .. } => FieldKind::DatePicker,
            Control::Select { .. } => FieldKind::Select,
            Control::Textarea { .. } => FieldKind::Textarea,
            Control::Checkbox { .. } => FieldKind::Checkbox,
            Control::Custom { .. } => FieldKind::Skeleton,
        }
    }
}

fn mismatch(config: &FieldConfig, value: &FieldValue) -> FormError {
    FormError::ValueKindMismatch {
        field: config.name.clone(),
        expected: config.empty_value().shape(),
        found: value.shape(),
    }
}

fn text(config: &FieldConfig, value: &FieldValue) -> Result<String, FormError> {
    match value {
        FieldValue::Text(s) => Ok(s.clone()),
        other => Err(mismatch(config, other)),
    }
}

/// Produce the control for `config`, bound to `value`. Pure: no I/O.
pub fn render(config: &FieldConfig, value: &FieldValue) -> Result<Control, FormError> {
    let name = config.name.clone();

    let control = match config.kind {
        FieldKind::Input => Control::TextInput {
            value: text(config, value)?,
            name,
            placeholder: config.placeholder.clone(),
            icon: config.icon.clone(),
        },
        FieldKind::PhoneInput => {
            let FieldValue::Phone(phone) = value else {
                return Err(mismatch(config, value));
            };
            Control::PhoneInput {
                name,
                value: phone.clone(),
                placeholder: config.placeholder.clone(),
                default_region: config.default_region,
            }
        }
        FieldKind::DatePicker => {
            let FieldValue::Date(date) = value else {
                return Err(mismatch(config, value));
            };
            let date_format =
                date_format::effective_format(config.date_format.as_deref(), config.show_time_select);
            Control::DatePicker {
                name,
                value: *date,
                display: date.map(|d| date_format::display(d, &date_format)),
                date_format,
                show_time_select: config.show_time_select,
                icon: Icon {
                    src: CALENDAR_ICON.to_string(),
                    alt: "calendar".to_string(),
                },
            }
        }
        FieldKind::Select => Control::Select {
            value: text(config, value)?,
            name,
            placeholder: config.placeholder.clone(),
            options: config.options.clone(),
        },
        FieldKind::Textarea => Control::Textarea {
            value: text(config, value)?,
            name,
            placeholder: config.placeholder.clone(),
            disabled: config.disabled,
        },
        FieldKind::Checkbox => {
            let FieldValue::Bool(checked) = value else {
                return Err(mismatch(config, value));
            };
            Control::Checkbox {
                name,
                checked: *checked,
                label: config.label.clone(),
            }
        }
        FieldKind::Skeleton => {
            let render = config
                .skeleton
                .as_ref()
                .ok_or_else(|| FormError::MissingSkeletonRenderer(config.name.clone()))?;
            Control::Custom {
                name,
                custom: render(value),
            }
        }
    };

    Ok(control)
}

/// Render function for a drag-and-drop file uploader skeleton.
pub fn file_uploader(value: &FieldValue) -> CustomControl {
    let files: &[UploadedFile] = match value {
        FieldValue::Files(files) => files,
        _ => &[],
    };
    CustomControl {
        widget: "file_uploader".to_string(),
        props: serde_json::json!({
            "files": files,
            "accept": ["image/*", "application/pdf"],
            "multiple": false,
        }),
    }
}
