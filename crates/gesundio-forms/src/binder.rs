//! Binds rendered controls to form state: label above the control (except
//! for checkboxes), validation message below it, one container per field so
//! mixed kinds line up within a row.

use serde::Serialize;

use gesundio_core::field_kind::{FieldKind, LabelPosition};

use crate::error::FormError;
use crate::field::{FieldConfig, SelectOption};
use crate::render::{self, Control};
use crate::state::{FieldEntry, FormState};
use crate::value::FieldValue;

/// Single-choice radio buttons. Lives outside the seven renderer kinds.
#[derive(Debug, Clone)]
pub struct RadioGroup {
    pub name: String,
    pub label: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone)]
pub enum FormItem {
    Field(FieldConfig),
    Radio(RadioGroup),
}

impl FormItem {
    pub fn name(&self) -> &str {
        match self {
            FormItem::Field(config) => &config.name,
            FormItem::Radio(group) => &group.name,
        }
    }

    pub fn empty_value(&self) -> FieldValue {
        match self {
            FormItem::Field(config) => config.empty_value(),
            FormItem::Radio(_) => FieldValue::Text(String::new()),
        }
    }

    fn label(&self) -> Option<&str> {
        match self {
            FormItem::Field(config) => match config.kind.label_position() {
                LabelPosition::Above => config.label.as_deref(),
                LabelPosition::Adjacent => None,
            },
            FormItem::Radio(group) => Some(&group.label),
        }
    }
}

impl From<FieldConfig> for FormItem {
    fn from(config: FieldConfig) -> Self {
        FormItem::Field(config)
    }
}

/// Fields shown side by side.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub items: Vec<FormItem>,
}

impl Row {
    pub fn of(items: impl IntoIterator<Item = FormItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn single(item: impl Into<FormItem>) -> Self {
        Self {
            items: vec![item.into()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Section {
    pub title: Option<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadioControl {
    pub control: &'static str,
    pub name: String,
    pub value: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundControl {
    Field(Control),
    Radio(RadioControl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub label: Option<String>,
    pub control: BoundControl,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub items: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub title: Option<String>,
    pub rows: Vec<RenderedRow>,
}

/// Render one item against the current state.
pub fn bind(item: &FormItem, state: &FormState) -> Result<RenderedField, FormError> {
    let name = item.name();
    let value = state
        .value(name)
        .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

    let control = match item {
        FormItem::Field(config) => BoundControl::Field(render::render(config, value)?),
        FormItem::Radio(group) => {
            let FieldValue::Text(selected) = value else {
                return Err(FormError::ValueKindMismatch {
                    field: name.to_string(),
                    expected: "text",
                    found: value.shape(),
                });
            };
            BoundControl::Radio(RadioControl {
                control: "radio_group",
                name: name.to_string(),
                value: selected.clone(),
                options: group.options.clone(),
            })
        }
    };

    Ok(RenderedField {
        name: name.to_string(),
        label: item.label().map(str::to_string),
        control,
        message: state.error(name).map(str::to_string),
    })
}

pub fn render_sections(
    sections: &[Section],
    state: &FormState,
) -> Result<Vec<RenderedSection>, FormError> {
    sections
        .iter()
        .map(|section| {
            let rows = section
                .rows
                .iter()
                .map(|row| {
                    let items = row
                        .items
                        .iter()
                        .map(|item| bind(item, state))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(RenderedRow { items })
                })
                .collect::<Result<Vec<_>, FormError>>()?;
            Ok(RenderedSection {
                title: section.title.clone(),
                rows,
            })
        })
        .collect()
}

/// One field kept on screen across state changes. Re-renders only when the
/// bound value or its error differs from what was last rendered, whichever
/// [`FormState`] it is refreshed against.
#[derive(Debug, Clone)]
pub struct BoundField {
    item: FormItem,
    seen: Option<FieldEntry>,
}

impl BoundField {
    pub fn new(item: FormItem) -> Self {
        Self { item, seen: None }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match &self.item {
            FormItem::Field(config) => Some(config.kind),
            FormItem::Radio(_) => None,
        }
    }

    pub fn refresh(&mut self, state: &FormState) -> Result<Option<RenderedField>, FormError> {
        let entry = state.entry(self.item.name());
        if entry.is_some() && entry == self.seen.as_ref() {
            return Ok(None);
        }
        let rendered = bind(&self.item, state)?;
        self.seen = entry.cloned();
        Ok(Some(rendered))
    }
}
