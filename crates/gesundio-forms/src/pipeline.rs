//! Submission pipeline: validate, shape, persist once, navigate.
//!
//! ```text
//! Idle → Validating → Invalid → Idle (errors on fields)
//!                   → Submitting → Navigating
//!                                → Idle (submit_error set, logged)
//! ```
//!
//! `FormSession::submit` takes `&mut self`, so at most one submission per
//! session can be in flight. The loading flag is true exactly while
//! Submitting and is cleared on every terminal transition.

use serde::Serialize;
use tracing::{error, info, warn};

use gesundio_core::backend::PatientBackend;

use crate::binder::{self, RenderedSection};
use crate::error::{FormError, SubmitError};
use crate::schema::ValidationErrors;
use crate::state::FormState;
use crate::value::FieldValue;
use crate::FormAssembler;

/// Client-side router. Called once per successful submission.
pub trait Navigator: Send {
    fn push(&mut self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting,
    Navigating,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Navigated to the contained path.
    Navigated(String),
    /// Blocked before any backend call.
    Invalid(ValidationErrors),
    /// Backend call failed or returned nothing usable.
    Failed(SubmitError),
}

/// One mounted form: its state, loading flag and last submission failure.
pub struct FormSession<F: FormAssembler> {
    form: F,
    context: F::Context,
    state: FormState,
    phase: SubmissionPhase,
    is_loading: bool,
    submit_error: Option<String>,
}

impl<F: FormAssembler> FormSession<F> {
    pub fn new(form: F, context: F::Context) -> Result<Self, FormError> {
        form.check()?;
        let state = form.default_state();
        Ok(Self {
            form,
            context,
            state,
            phase: SubmissionPhase::Idle,
            is_loading: false,
            submit_error: None,
        })
    }

    /// Resume with state decoded elsewhere, e.g. from a request body.
    pub fn with_state(form: F, context: F::Context, state: FormState) -> Result<Self, FormError> {
        let mut session = Self::new(form, context)?;
        for name in session.form.items().iter().map(|i| i.name()) {
            if !state.contains(name) {
                return Err(FormError::MissingValue(name.to_string()));
            }
        }
        session.state = state;
        Ok(session)
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// User-facing message from the last failed attempt.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Change handler for any bound control.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<bool, FormError> {
        self.state.set_value(name, value)
    }

    pub fn render(&self) -> Result<Vec<RenderedSection>, FormError> {
        binder::render_sections(self.form.sections(), &self.state)
    }

    /// Run the schema and write the per-field messages into state.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        let result = self.form.schema().validate(&self.state);
        match &result {
            Ok(()) => self.state.clear_errors(),
            Err(errors) => self.state.apply_errors(errors),
        }
        result
    }

    pub async fn submit(
        &mut self,
        backend: &dyn PatientBackend,
        navigator: &mut dyn Navigator,
    ) -> SubmissionOutcome {
        if self.phase == SubmissionPhase::Submitting {
            warn!(form = self.form.id(), "previous submission was abandoned");
        }
        self.submit_error = None;
        self.phase = SubmissionPhase::Validating;

        if let Err(errors) = self.validate() {
            info!(form = self.form.id(), fields = errors.len(), "submission blocked by validation");
            self.settle(SubmissionPhase::Idle);
            return SubmissionOutcome::Invalid(errors);
        }

        let payload = match self.form.shape(&self.context, &self.state) {
            Ok(payload) => payload,
            Err(e) => return self.fail(SubmitError::Shape(e)),
        };

        self.phase = SubmissionPhase::Submitting;
        self.is_loading = true;

        let record = match self.form.persist(backend, &payload).await {
            Ok(Some(record)) => record,
            Ok(None) => return self.fail(SubmitError::EmptyRecord),
            Err(e) => return self.fail(SubmitError::Backend(e)),
        };

        let Some(route) = self.form.next_route(&self.context, &record) else {
            return self.fail(SubmitError::EmptyRecord);
        };

        self.settle(SubmissionPhase::Navigating);
        info!(form = self.form.id(), route = %route, "submission complete");
        navigator.push(&route);
        SubmissionOutcome::Navigated(route)
    }

    fn settle(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
        self.is_loading = false;
    }

    fn fail(&mut self, err: SubmitError) -> SubmissionOutcome {
        error!(form = self.form.id(), error = %err, "submission failed");
        self.submit_error = Some(err.user_message().to_string());
        self.settle(SubmissionPhase::Idle);
        SubmissionOutcome::Failed(err)
    }
}
