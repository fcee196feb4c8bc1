use axum::Json;
use axum::extract::State;

use gesundio_core::models::appointment::AppointmentSummary;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn recent_appointments(
    State(state): State<AppState>,
) -> Result<Json<AppointmentSummary>, ApiError> {
    Ok(Json(state.backend.recent_appointments().await?))
}
