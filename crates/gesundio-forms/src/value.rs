use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use gesundio_core::field_kind::FieldKind;

/// The current value bound to one field. Each field kind accepts exactly one
/// variant; see [`FieldValue::empty_for`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Phone(Option<PhoneNumber>),
    Date(Option<jiff::civil::DateTime>),
    Bool(bool),
    Files(Vec<UploadedFile>),
}

impl FieldValue {
    /// The "nothing entered yet" value for a kind.
    pub fn empty_for(kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::Input | FieldKind::Select | FieldKind::Textarea => {
                FieldValue::Text(String::new())
            }
            FieldKind::PhoneInput => FieldValue::Phone(None),
            FieldKind::DatePicker => FieldValue::Date(None),
            FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::Skeleton => FieldValue::Files(Vec::new()),
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Phone(_) => "phone",
            FieldValue::Date(_) => "date",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Files(_) => "file list",
        }
    }

    pub fn same_shape(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// True when nothing meaningful was entered. `false` is a value for a
    /// checkbox, not an absence.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Phone(p) => p.is_none(),
            FieldValue::Date(d) => d.is_none(),
            FieldValue::Bool(_) => false,
            FieldValue::Files(f) => f.is_empty(),
        }
    }

    /// String view used by length and format rules.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Phone(Some(p)) => Some(p.as_str()),
            _ => None,
        }
    }
}

/// Regions the phone control can preset. Only the calling code matters for
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    #[default]
    De,
    At,
    Ch,
    Fr,
    Gb,
    Us,
}

impl Region {
    pub fn calling_code(&self) -> &'static str {
        match self {
            Region::De => "49",
            Region::At => "43",
            Region::Ch => "41",
            Region::Fr => "33",
            Region::Gb => "44",
            Region::Us => "1",
        }
    }
}

/// A phone number in international form (`+<digits>`), as emitted by the
/// phone control. Shape is not checked here; that is the schema's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw input. Formatting characters are dropped, a leading
    /// `00` becomes `+`, and a national number starting with a single `0`
    /// gets the region's calling code. Empty input is no value.
    pub fn normalize(input: &str, region: Region) -> Option<PhoneNumber> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')' | '/'))
            .collect();

        if compact.is_empty() {
            return None;
        }

        let normalized = if compact.starts_with('+') {
            compact
        } else if let Some(rest) = compact.strip_prefix("00") {
            format!("+{rest}")
        } else if let Some(rest) = compact.strip_prefix('0') {
            format!("+{}{rest}", region.calling_code())
        } else {
            format!("+{compact}")
        };

        Some(PhoneNumber(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One file picked in an uploader control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// Controls only ever describe files; the bytes stay server-side.
impl Serialize for UploadedFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("UploadedFile", 3)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("content_type", &self.content_type)?;
        s.serialize_field("size", &self.bytes.len())?;
        s.end()
    }
}
