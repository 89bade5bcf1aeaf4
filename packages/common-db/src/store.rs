//! Acesso ao armazenamento da clínica
//!
//! `ClinicStore` é o ponto de injeção usado pelas aplicações: cada operação
//! recebe o objeto de acesso explicitamente, o que permite trocar o SQLite
//! por um dublê nos testes (`MockClinicStore`, com a feature `test-utils`).

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbError;
use crate::models::{
    Appointment, AppointmentSummary, Doctor, MedicalRecord, MedicalRecordSummary, NewAppointment,
    NewMedicalRecord, NewPatient, Patient,
};

/// Operações de armazenamento usadas pelos serviços da clínica.
///
/// Unicidade de CPF e integridade referencial são garantidas por restrições
/// do banco; as implementações devem reportar essas violações como
/// [`DbError::UniqueViolation`] e [`DbError::ForeignKeyViolation`].
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait ClinicStore: Send + Sync {
    /// Pacientes em ordem crescente de id
    async fn list_patients(&self) -> Result<Vec<Patient>, DbError>;

    async fn insert_patient(&self, patient: &NewPatient) -> Result<Patient, DbError>;

    /// Id de um paciente com o CPF informado, ignorando `excluding`
    async fn find_patient_id_by_cpf(
        &self,
        cpf: &str,
        excluding: Option<i64>,
    ) -> Result<Option<i64>, DbError>;

    /// Retorna `None` quando o id não existe
    async fn update_patient(
        &self,
        id: i64,
        patient: &NewPatient,
    ) -> Result<Option<Patient>, DbError>;

    /// Remove consultas, prontuários e o paciente numa única transação.
    /// Retorna `None` (sem alterar nada) quando o id não existe.
    async fn delete_patient_cascade(&self, id: i64) -> Result<Option<Patient>, DbError>;

    /// Médicos em ordem crescente de id
    async fn list_doctors(&self) -> Result<Vec<Doctor>, DbError>;

    /// Consultas da mais recente para a mais antiga
    async fn list_appointments(&self) -> Result<Vec<AppointmentSummary>, DbError>;

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, DbError>;

    /// Prontuários do atendimento mais recente para o mais antigo
    async fn list_medical_records(&self) -> Result<Vec<MedicalRecordSummary>, DbError>;

    async fn insert_medical_record(
        &self,
        record: &NewMedicalRecord,
    ) -> Result<MedicalRecord, DbError>;

    /// Quantidade de prontuários do paciente dono do CPF (0 se não houver)
    async fn count_attendances_by_cpf(&self, cpf: &str) -> Result<i64, DbError>;
}

/// Implementação de [`ClinicStore`] sobre um pool SQLite
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const PATIENT_COLUMNS: &str = "id, name, birth_date, cpf, phone";

#[async_trait]
impl ClinicStore for SqliteStore {
    async fn list_patients(&self) -> Result<Vec<Patient>, DbError> {
        let patients = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {} FROM patients ORDER BY id",
            PATIENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(patients)
    }

    async fn insert_patient(&self, patient: &NewPatient) -> Result<Patient, DbError> {
        let created = sqlx::query_as::<_, Patient>(&format!(
            "INSERT INTO patients (name, birth_date, cpf, phone) VALUES (?, ?, ?, ?) RETURNING {}",
            PATIENT_COLUMNS
        ))
        .bind(&patient.name)
        .bind(patient.birth_date)
        .bind(&patient.cpf)
        .bind(&patient.phone)
        .fetch_one(&self.pool)
        .await?;

        debug!(patient_id = created.id, "Paciente inserido");
        Ok(created)
    }

    async fn find_patient_id_by_cpf(
        &self,
        cpf: &str,
        excluding: Option<i64>,
    ) -> Result<Option<i64>, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM patients WHERE cpf = ? AND (? IS NULL OR id != ?) LIMIT 1",
        )
        .bind(cpf)
        .bind(excluding)
        .bind(excluding)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_patient(
        &self,
        id: i64,
        patient: &NewPatient,
    ) -> Result<Option<Patient>, DbError> {
        let updated = sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET name = ?, birth_date = ?, cpf = ?, phone = ? WHERE id = ? RETURNING {}",
            PATIENT_COLUMNS
        ))
        .bind(&patient.name)
        .bind(patient.birth_date)
        .bind(&patient.cpf)
        .bind(&patient.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_patient_cascade(&self, id: i64) -> Result<Option<Patient>, DbError> {
        let mut transaction = self.pool.begin().await?;

        let appointments = sqlx::query("DELETE FROM appointments WHERE patient_id = ?")
            .bind(id)
            .execute(&mut *transaction)
            .await?
            .rows_affected();

        let records = sqlx::query("DELETE FROM medical_records WHERE patient_id = ?")
            .bind(id)
            .execute(&mut *transaction)
            .await?
            .rows_affected();

        let deleted = sqlx::query_as::<_, Patient>(&format!(
            "DELETE FROM patients WHERE id = ? RETURNING {}",
            PATIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *transaction)
        .await?;

        match deleted {
            Some(patient) => {
                transaction.commit().await?;
                info!(
                    patient_id = id,
                    appointments, records, "Paciente removido com seus dependentes"
                );
                Ok(Some(patient))
            }
            None => {
                transaction.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DbError> {
        let doctors =
            sqlx::query_as::<_, Doctor>("SELECT id, name, specialty FROM doctors ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(doctors)
    }

    async fn list_appointments(&self) -> Result<Vec<AppointmentSummary>, DbError> {
        let appointments = sqlx::query_as::<_, AppointmentSummary>(
            r#"
            SELECT a.id, a.scheduled_at, a.value, a.patient_id,
                   p.name AS patient_name,
                   d.name AS doctor_name, d.specialty
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            JOIN doctors d ON a.doctor_id = d.id
            ORDER BY a.scheduled_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, DbError> {
        let created = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, scheduled_at, value)
            VALUES (?, ?, ?, ?)
            RETURNING id, patient_id, doctor_id, scheduled_at, value, created_at
            "#,
        )
        .bind(appointment.patient_id)
        .bind(appointment.doctor_id)
        .bind(appointment.scheduled_at)
        .bind(appointment.value)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn list_medical_records(&self) -> Result<Vec<MedicalRecordSummary>, DbError> {
        let records = sqlx::query_as::<_, MedicalRecordSummary>(
            r#"
            SELECT mr.id, mr.patient_id,
                   p.name AS patient_name,
                   mr.attended_at, mr.description
            FROM medical_records mr
            JOIN patients p ON mr.patient_id = p.id
            ORDER BY mr.attended_at DESC, mr.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn insert_medical_record(
        &self,
        record: &NewMedicalRecord,
    ) -> Result<MedicalRecord, DbError> {
        let created = sqlx::query_as::<_, MedicalRecord>(
            r#"
            INSERT INTO medical_records (patient_id, description)
            VALUES (?, ?)
            RETURNING id, patient_id, description, attended_at
            "#,
        )
        .bind(record.patient_id)
        .bind(&record.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn count_attendances_by_cpf(&self, cpf: &str) -> Result<i64, DbError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(mr.id)
            FROM medical_records mr
            JOIN patients p ON mr.patient_id = p.id
            WHERE p.cpf = ?
            "#,
        )
        .bind(cpf)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
