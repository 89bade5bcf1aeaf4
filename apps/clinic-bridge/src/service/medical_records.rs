//! Registro de prontuários

use std::sync::Arc;

use common_db::models::{MedicalRecord, MedicalRecordSummary, NewMedicalRecord};
use common_db::{ClinicStore, DbError};
use tracing::info;

use super::required_text;
use crate::error::ClinicError;

#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecordInput {
    pub patient_id: i64,
    pub description: String,
}

pub struct MedicalRecordService {
    store: Arc<dyn ClinicStore>,
}

impl MedicalRecordService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<MedicalRecordSummary>, ClinicError> {
        Ok(self.store.list_medical_records().await?)
    }

    /// A data do atendimento é a do momento da gravação
    pub async fn create(&self, input: MedicalRecordInput) -> Result<MedicalRecord, ClinicError> {
        let record = NewMedicalRecord {
            patient_id: input.patient_id,
            description: required_text("description", &input.description)?,
        };

        match self.store.insert_medical_record(&record).await {
            Ok(created) => {
                info!(record_id = created.id, patient_id = created.patient_id, "Prontuário registrado");
                Ok(created)
            }
            Err(DbError::ForeignKeyViolation(_)) => Err(ClinicError::ForeignKeyViolation(
                "Paciente informado não existe.".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common_db::MockClinicStore;

    #[tokio::test]
    async fn test_create_trims_description() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_medical_record()
            .withf(|r| r.patient_id == 5 && r.description == "Dor de cabeça")
            .times(1)
            .returning(|r| {
                Ok(MedicalRecord {
                    id: 1,
                    patient_id: r.patient_id,
                    description: r.description.clone(),
                    attended_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                        .unwrap()
                        .and_hms_opt(8, 30, 0)
                        .unwrap(),
                })
            });

        let created = MedicalRecordService::new(Arc::new(mock))
            .create(MedicalRecordInput {
                patient_id: 5,
                description: "  Dor de cabeça\n".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.description, "Dor de cabeça");
    }

    #[tokio::test]
    async fn test_blank_description_is_rejected() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_medical_record().never();

        let err = MedicalRecordService::new(Arc::new(mock))
            .create(MedicalRecordInput {
                patient_id: 5,
                description: " ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_patient_is_foreign_key_violation() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_medical_record()
            .returning(|_| Err(DbError::ForeignKeyViolation("FOREIGN KEY constraint failed".into())));

        let err = MedicalRecordService::new(Arc::new(mock))
            .create(MedicalRecordInput {
                patient_id: 404,
                description: "Retorno".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::ForeignKeyViolation(_)));
    }
}
