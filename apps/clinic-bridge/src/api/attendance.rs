use axum::extract::{Path, State};
use axum::Json;
use common_db::models::AttendanceCount;

use crate::error::ClinicError;
use crate::state::AppState;

/// GET /attendance-count/:identity_number
pub async fn attendance_count(
    State(state): State<AppState>,
    Path(identity_number): Path<String>,
) -> Result<Json<AttendanceCount>, ClinicError> {
    Ok(Json(state.attendance().count(&identity_number).await?))
}
