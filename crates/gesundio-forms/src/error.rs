use thiserror::Error;

use gesundio_core::error::{BackendError, CoreError};

/// Form configuration and value-binding errors. These indicate a defect in a
/// form definition or a malformed submitted value, never a user input that
/// merely fails validation.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("skeleton field '{0}' has no render function")]
    MissingSkeletonRenderer(String),

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("field '{field}' is not known to the '{form}' schema")]
    NotInSchema { form: String, field: String },

    #[error("schema rule for '{field}' has no field in the '{form}' layout")]
    SchemaFieldMissing { form: String, field: String },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{field}' holds a {expected} value, got {found}")]
    ValueKindMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("malformed value for '{field}': {reason}")]
    MalformedValue { field: String, reason: String },

    #[error("missing value for '{0}'")]
    MissingValue(String),
}

/// Why a submission attempt that passed validation did not navigate.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not shape submission: {0}")]
    Shape(#[from] FormError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("backend returned no usable record")]
    EmptyRecord,
}

impl SubmitError {
    /// Message safe to show next to the submit button.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Shape(_) => "Some of your answers could not be read. Please review the form.",
            SubmitError::Backend(_) | SubmitError::EmptyRecord => {
                "We could not save your details. Please try again."
            }
        }
    }
}
