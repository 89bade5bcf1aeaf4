use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common_db::models::Patient;

use super::extract::ValidatedJson;
use super::payloads::{
    CreatePatientRequest, DeletePatientRequest, PatientEnvelope, UpdatePatientRequest,
};
use crate::error::ClinicError;
use crate::service::PatientInput;
use crate::state::AppState;

/// GET /patients
pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ClinicError> {
    Ok(Json(state.patients().list().await?))
}

/// POST /patients
pub async fn create_patient(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientEnvelope>), ClinicError> {
    let input = PatientInput::try_from(req)?;
    let patient = state.patients().create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(PatientEnvelope {
            message: "Paciente inserido com sucesso!".to_string(),
            patient,
        }),
    ))
}

/// PUT /patients
pub async fn update_patient(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UpdatePatientRequest>,
) -> Result<Json<PatientEnvelope>, ClinicError> {
    let (id, input) = req.into_parts()?;
    let patient = state.patients().update(id, input).await?;

    Ok(Json(PatientEnvelope {
        message: "Paciente atualizado com sucesso!".to_string(),
        patient,
    }))
}

/// DELETE /patients, com o id no corpo
pub async fn delete_patient(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DeletePatientRequest>,
) -> Result<Json<PatientEnvelope>, ClinicError> {
    let patient = state.patients().delete(req.id()?).await?;

    Ok(Json(PatientEnvelope {
        message: "Paciente excluído com sucesso!".to_string(),
        patient,
    }))
}
