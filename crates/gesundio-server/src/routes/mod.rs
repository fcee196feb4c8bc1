pub mod admin;
pub mod forms;
pub mod health;
pub mod patients;
pub mod users;

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use gesundio_core::backend::PatientBackend;
use gesundio_forms::FormAssembler;
use gesundio_forms::decode;
use gesundio_forms::pipeline::{FormSession, Navigator, SubmissionOutcome};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub redirect: String,
}

/// Navigator for server-side submissions: the path becomes the response.
#[derive(Debug, Default)]
struct RedirectCapture {
    path: Option<String>,
}

impl Navigator for RedirectCapture {
    fn push(&mut self, path: &str) {
        self.path = Some(path.to_string());
    }
}

/// Decode a JSON body into a session for `form` and run one submission.
async fn submit<F: FormAssembler>(
    form: F,
    context: F::Context,
    body: &Map<String, Value>,
    backend: &dyn PatientBackend,
) -> Result<Json<SubmitResponse>, ApiError> {
    let state = decode::submission(&form, body)?;
    let mut session = FormSession::with_state(form, context, state)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let mut capture = RedirectCapture::default();

    match session.submit(backend, &mut capture).await {
        SubmissionOutcome::Navigated(redirect) => Ok(Json(SubmitResponse { redirect })),
        SubmissionOutcome::Invalid(errors) => Err(ApiError::Unprocessable(errors)),
        SubmissionOutcome::Failed(e) => Err(e.into()),
    }
}
