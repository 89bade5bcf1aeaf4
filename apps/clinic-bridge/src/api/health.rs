use axum::Json;

use super::payloads::HealthResponse;
use crate::built_info;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: built_info::PKG_NAME.to_string(),
        version: built_info::PKG_VERSION.to_string(),
    })
}
