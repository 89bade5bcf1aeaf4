use std::sync::Arc;

use common_db::ClinicStore;

use crate::service::{
    AppointmentService, AttendanceService, DoctorService, MedicalRecordService, PatientService,
};

/// Estado compartilhado pelos handlers: apenas o acesso ao armazenamento.
///
/// Os serviços são montados por requisição a partir dele.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ClinicStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub fn patients(&self) -> PatientService {
        PatientService::new(self.store.clone())
    }

    pub fn doctors(&self) -> DoctorService {
        DoctorService::new(self.store.clone())
    }

    pub fn appointments(&self) -> AppointmentService {
        AppointmentService::new(self.store.clone())
    }

    pub fn medical_records(&self) -> MedicalRecordService {
        MedicalRecordService::new(self.store.clone())
    }

    pub fn attendance(&self) -> AttendanceService {
        AttendanceService::new(self.store.clone())
    }
}
