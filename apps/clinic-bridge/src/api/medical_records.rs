use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common_db::models::MedicalRecordSummary;

use super::extract::ValidatedJson;
use super::payloads::{CreateMedicalRecordRequest, MedicalRecordEnvelope};
use crate::error::ClinicError;
use crate::service::MedicalRecordInput;
use crate::state::AppState;

/// GET /medical-records
pub async fn list_medical_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<MedicalRecordSummary>>, ClinicError> {
    Ok(Json(state.medical_records().list().await?))
}

/// POST /medical-records
pub async fn create_medical_record(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateMedicalRecordRequest>,
) -> Result<(StatusCode, Json<MedicalRecordEnvelope>), ClinicError> {
    let input = MedicalRecordInput::try_from(req)?;
    let record = state.medical_records().create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MedicalRecordEnvelope {
            message: "Prontuário registrado com sucesso!".to_string(),
            record,
        }),
    ))
}
