//! gesundio-forms
//!
//! Patient-facing form definitions. Defines field rendering, binding,
//! declarative validation, payload shaping and the submission pipeline for
//! each supported form. Talks to persistence only through
//! [`PatientBackend`].

pub mod binder;
pub mod date_format;
pub mod decode;
pub mod error;
pub mod field;
pub mod forms;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod state;
pub mod value;

use std::collections::HashSet;

use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::field_kind::FieldKind;

use binder::{FormItem, Section};
use error::FormError;
use schema::FormSchema;
use state::FormState;

/// Layout and validation of one form.
pub trait FormDefinition: Send + Sync {
    /// Unique identifier (e.g., "intake", "registration", "appointment").
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn subtitle(&self) -> &str;

    fn submit_label(&self) -> &str {
        "Get Started"
    }

    fn sections(&self) -> &[Section];

    fn schema(&self) -> &FormSchema;

    /// Every item in layout order.
    fn items(&self) -> Vec<&FormItem> {
        self.sections()
            .iter()
            .flat_map(|s| &s.rows)
            .flat_map(|r| &r.items)
            .collect()
    }

    /// Fresh state with every field at its empty value.
    fn default_state(&self) -> FormState {
        let mut state = FormState::new();
        for item in self.items() {
            state.insert(item.name(), item.empty_value());
        }
        state
    }

    /// Check that names are unique, that layout and schema agree, and that
    /// every skeleton field can render.
    fn check(&self) -> Result<(), FormError> {
        let mut seen = HashSet::new();
        for item in self.items() {
            let name = item.name();
            if !seen.insert(name) {
                return Err(FormError::DuplicateField(name.to_string()));
            }
            if !self.schema().knows(name) {
                return Err(FormError::NotInSchema {
                    form: self.id().to_string(),
                    field: name.to_string(),
                });
            }
            if let FormItem::Field(config) = item
                && config.kind == FieldKind::Skeleton
                && config.skeleton.is_none()
            {
                return Err(FormError::MissingSkeletonRenderer(name.to_string()));
            }
        }
        for rules in self.schema().fields() {
            if !seen.contains(rules.name.as_str()) {
                return Err(FormError::SchemaFieldMissing {
                    form: self.id().to_string(),
                    field: rules.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A form that turns validated state into a domain payload and sends it to
/// the backend.
pub trait FormAssembler: FormDefinition {
    /// Caller-supplied data the form needs beyond its own fields.
    type Context: Send + Sync;
    type Payload: Send + Sync;
    type Record: Send;

    /// Build the payload from state that has passed validation.
    fn shape(&self, context: &Self::Context, state: &FormState) -> Result<Self::Payload, FormError>;

    /// Single attempt; no retry.
    fn persist<'a>(
        &'a self,
        backend: &'a dyn PatientBackend,
        payload: &'a Self::Payload,
    ) -> BoxFuture<'a, Result<Option<Self::Record>, BackendError>>;

    /// Where to go after success. `None` when the record is unusable.
    fn next_route(&self, context: &Self::Context, record: &Self::Record) -> Option<String>;
}

/// Return all registered forms.
pub fn all_forms() -> Vec<Box<dyn FormDefinition>> {
    vec![
        Box::new(forms::intake::IntakeForm),
        Box::new(forms::registration::RegistrationForm),
        Box::new(forms::appointment::AppointmentForm),
    ]
}

/// Look up a form by ID.
pub fn get_form(id: &str) -> Option<Box<dyn FormDefinition>> {
    all_forms().into_iter().find(|f| f.id() == id)
}
