use axum::extract::State;
use axum::Json;
use common_db::models::Doctor;

use crate::error::ClinicError;
use crate::state::AppState;

/// GET /doctors
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>, ClinicError> {
    Ok(Json(state.doctors().list().await?))
}
