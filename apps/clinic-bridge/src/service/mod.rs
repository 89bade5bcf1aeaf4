//! Regras de negócio da clínica
//!
//! Cada serviço recebe o objeto de armazenamento já construído
//! (`Arc<dyn ClinicStore>`); nenhum estado é compartilhado entre requisições.

pub mod appointments;
pub mod attendance;
pub mod doctors;
pub mod medical_records;
pub mod patients;

pub use appointments::{AppointmentInput, AppointmentService};
pub use attendance::AttendanceService;
pub use doctors::DoctorService;
pub use medical_records::{MedicalRecordInput, MedicalRecordService};
pub use patients::{PatientInput, PatientService};

use crate::error::ClinicError;

/// Texto obrigatório, sem espaços nas pontas
fn required_text(field: &str, value: &str) -> Result<String, ClinicError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClinicError::Validation(format!(
            "O campo {} é obrigatório.",
            field
        )));
    }
    Ok(trimmed.to_string())
}
