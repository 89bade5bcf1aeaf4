use std::sync::Arc;

use common_db::models::Doctor;
use common_db::ClinicStore;

use crate::error::ClinicError;

/// Consulta ao cadastro de médicos (sem criação por esta API)
pub struct DoctorService {
    store: Arc<dyn ClinicStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, ClinicError> {
        Ok(self.store.list_doctors().await?)
    }
}
