use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::{Map, Value};

use gesundio_core::models::patient::Patient;
use gesundio_forms::forms::appointment::{AppointmentContext, AppointmentForm};
use gesundio_forms::forms::registration::RegistrationForm;

use super::{SubmitResponse, submit};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn register_patient(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = body?;
    let user = state
        .backend
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {user_id}")))?;

    submit(RegistrationForm, user, &body, state.backend.as_ref()).await
}

/// Appointment request for a registered patient. Redirects to the success
/// page for the new appointment.
pub async fn request_appointment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(body) = body?;
    let patient = find_patient(&state, &user_id).await?;

    submit(
        AppointmentForm,
        AppointmentContext::from(&patient),
        &body,
        state.backend.as_ref(),
    )
    .await
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(find_patient(&state, &user_id).await?))
}

async fn find_patient(state: &AppState, user_id: &str) -> Result<Patient, ApiError> {
    state
        .backend
        .get_patient(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("patient not found for user: {user_id}")))
}
