//! Registro e listagem de consultas

use std::sync::Arc;

use chrono::NaiveDateTime;
use common_db::models::{Appointment, AppointmentSummary, NewAppointment};
use common_db::{ClinicStore, DbError};
use tracing::{info, warn};

use crate::error::ClinicError;

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentInput {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub value: f64,
}

pub struct AppointmentService {
    store: Arc<dyn ClinicStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<AppointmentSummary>, ClinicError> {
        Ok(self.store.list_appointments().await?)
    }

    /// Agenda uma consulta. Paciente e médico precisam existir; a checagem é
    /// feita pelas chaves estrangeiras, então nada é gravado em caso de falha.
    pub async fn create(&self, input: AppointmentInput) -> Result<Appointment, ClinicError> {
        if !input.value.is_finite() || input.value < 0.0 {
            return Err(ClinicError::Validation(
                "Valor da consulta inválido.".to_string(),
            ));
        }

        let appointment = NewAppointment {
            patient_id: input.patient_id,
            doctor_id: input.doctor_id,
            scheduled_at: input.scheduled_at,
            value: input.value,
        };

        match self.store.insert_appointment(&appointment).await {
            Ok(created) => {
                info!(
                    appointment_id = created.id,
                    patient_id = created.patient_id,
                    doctor_id = created.doctor_id,
                    "Consulta registrada"
                );
                Ok(created)
            }
            Err(DbError::ForeignKeyViolation(_)) => {
                warn!(
                    patient_id = input.patient_id,
                    doctor_id = input.doctor_id,
                    "Consulta recusada: paciente ou médico inexistente"
                );
                Err(ClinicError::ForeignKeyViolation(
                    "Paciente ou médico informado não existe.".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common_db::MockClinicStore;

    fn input(value: f64) -> AppointmentInput {
        AppointmentInput {
            patient_id: 1,
            doctor_id: 2,
            scheduled_at: NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            value,
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_appointment()
            .withf(|a| a.patient_id == 1 && a.doctor_id == 2 && a.value == 180.5)
            .times(1)
            .returning(|a| {
                Ok(Appointment {
                    id: 10,
                    patient_id: a.patient_id,
                    doctor_id: a.doctor_id,
                    scheduled_at: a.scheduled_at,
                    value: a.value,
                    created_at: a.scheduled_at,
                })
            });

        let created = AppointmentService::new(Arc::new(mock))
            .create(input(180.5))
            .await
            .unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn test_negative_or_nan_value_is_rejected() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_appointment().never();
        let svc = AppointmentService::new(Arc::new(mock));

        for value in [-1.0, f64::NAN, f64::INFINITY] {
            let err = svc.create(input(value)).await.unwrap_err();
            assert!(matches!(err, ClinicError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_unknown_doctor_is_foreign_key_violation() {
        let mut mock = MockClinicStore::new();
        mock.expect_insert_appointment()
            .returning(|_| Err(DbError::ForeignKeyViolation("FOREIGN KEY constraint failed".into())));

        let err = AppointmentService::new(Arc::new(mock))
            .create(input(100.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClinicError::ForeignKeyViolation(_)));
    }
}
