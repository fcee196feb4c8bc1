use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Map, Value};

use gesundio_forms::forms::intake::IntakeForm;

use super::{SubmitResponse, submit};
use crate::error::ApiError;
use crate::state::AppState;

/// Intake submission. Creates (or finds) the user and points the client at
/// the registration form.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = body?;
    submit(IntakeForm, (), &body, state.backend.as_ref()).await
}
