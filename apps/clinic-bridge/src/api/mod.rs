//! Rotas HTTP do serviço

mod appointments;
mod attendance;
mod doctors;
mod extract;
mod health;
mod medical_records;
mod patients;
pub mod payloads;

pub use extract::ValidatedJson;

use axum::routing::get;
use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Monta o roteador com as camadas de trace, CORS, compressão e limite de
/// requisições simultâneas.
///
/// O `Router::layer` replica a camada em cada rota, então o limite usa um
/// semáforo compartilhado entre todas elas.
pub fn router(state: AppState, max_concurrent_requests: usize) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/patients",
            get(patients::list_patients)
                .post(patients::create_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/doctors", get(doctors::list_doctors))
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/medical-records",
            get(medical_records::list_medical_records)
                .post(medical_records::create_medical_record),
        )
        .route(
            "/attendance-count/:identity_number",
            get(attendance::attendance_count),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .layer(GlobalConcurrencyLimitLayer::new(max_concurrent_requests)),
        )
        .with_state(state)
}
