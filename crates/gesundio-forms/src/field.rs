use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use gesundio_core::field_kind::FieldKind;

use crate::error::FormError;
use crate::value::{FieldValue, Region};

/// A `{value, label}` pair offered by a select or radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            image: None,
        }
    }

    /// Option whose value doubles as its label.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub src: String,
    pub alt: String,
}

/// Output of a skeleton field's render function: a named composite widget and
/// whatever props it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomControl {
    pub widget: String,
    pub props: serde_json::Value,
}

pub type SkeletonRenderer = Arc<dyn Fn(&FieldValue) -> CustomControl + Send + Sync>;

/// Immutable descriptor for one field usage within a form.
#[derive(Clone)]
pub struct FieldConfig {
    pub kind: FieldKind,
    pub name: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub icon: Option<Icon>,
    pub disabled: bool,
    pub date_format: Option<String>,
    pub show_time_select: bool,
    pub default_region: Region,
    pub options: Vec<SelectOption>,
    pub skeleton: Option<SkeletonRenderer>,
}

impl FieldConfig {
    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: None,
            placeholder: None,
            icon: None,
            disabled: false,
            date_format: None,
            show_time_select: false,
            default_region: Region::default(),
            options: Vec::new(),
            skeleton: None,
        }
    }

    /// Build from a wire tag. An unrecognized tag is a configuration error.
    pub fn parse(kind: &str, name: impl Into<String>) -> Result<Self, FormError> {
        let kind = FieldKind::from_str(kind)?;
        Ok(Self::new(kind, name))
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Input, name)
    }

    pub fn phone_input(name: impl Into<String>) -> Self {
        Self::new(FieldKind::PhoneInput, name)
    }

    pub fn date_picker(name: impl Into<String>) -> Self {
        Self::new(FieldKind::DatePicker, name)
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut config = Self::new(FieldKind::Select, name);
        config.options = options;
        config
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Textarea, name)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Checkbox, name)
    }

    pub fn skeleton(
        name: impl Into<String>,
        render: impl Fn(&FieldValue) -> CustomControl + Send + Sync + 'static,
    ) -> Self {
        let mut config = Self::new(FieldKind::Skeleton, name);
        config.skeleton = Some(Arc::new(render));
        config
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn icon(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.icon = Some(Icon {
            src: src.into(),
            alt: alt.into(),
        });
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn show_time_select(mut self, show: bool) -> Self {
        self.show_time_select = show;
        self
    }

    pub fn default_region(mut self, region: Region) -> Self {
        self.default_region = region;
        self
    }

    pub fn empty_value(&self) -> FieldValue {
        FieldValue::empty_for(self.kind)
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("placeholder", &self.placeholder)
            .field("icon", &self.icon)
            .field("disabled", &self.disabled)
            .field("date_format", &self.date_format)
            .field("show_time_select", &self.show_time_select)
            .field("default_region", &self.default_region)
            .field("options", &self.options)
            .field("skeleton", &self.skeleton.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
