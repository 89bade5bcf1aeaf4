use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common_db::models::{Appointment, AppointmentSummary};

use super::extract::ValidatedJson;
use super::payloads::CreateAppointmentRequest;
use crate::error::ClinicError;
use crate::service::AppointmentInput;
use crate::state::AppState;

/// GET /appointments
pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentSummary>>, ClinicError> {
    Ok(Json(state.appointments().list().await?))
}

/// POST /appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ClinicError> {
    let input = AppointmentInput::try_from(req)?;
    let appointment = state.appointments().create(input).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}
