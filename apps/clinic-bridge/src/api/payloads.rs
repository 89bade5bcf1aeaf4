//! Corpos de requisição e resposta da API
//!
//! Os campos de entrada são `Option` para que a ausência seja reportada pelo
//! `validator` como erro de validação, e não como JSON malformado.

use chrono::{NaiveDate, NaiveDateTime};
use common_db::models::{MedicalRecord, Patient};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::ClinicError;
use crate::service::{AppointmentInput, MedicalRecordInput, PatientInput};

/// Formatos aceitos para data e hora da consulta (o primeiro é o do
/// `<input type="datetime-local">`)
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("data e hora inválida: {}", raw))),
    }
}

/// Campo já garantido pelo `validate()`; a conversão apenas desembrulha
fn present<T>(value: Option<T>, field: &str) -> Result<T, ClinicError> {
    value.ok_or_else(|| ClinicError::Validation(format!("O campo {} é obrigatório.", field)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub birth_date: Option<NaiveDate>,
    #[validate(required, length(min = 1))]
    pub identity_number: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
}

impl TryFrom<CreatePatientRequest> for PatientInput {
    type Error = ClinicError;

    fn try_from(req: CreatePatientRequest) -> Result<Self, Self::Error> {
        Ok(PatientInput {
            name: present(req.name, "name")?,
            birth_date: present(req.birth_date, "birthDate")?,
            identity_number: present(req.identity_number, "identityNumber")?,
            phone: present(req.phone, "phone")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    #[validate(required)]
    pub id: Option<i64>,
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub birth_date: Option<NaiveDate>,
    #[validate(required, length(min = 1))]
    pub identity_number: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
}

impl UpdatePatientRequest {
    pub fn into_parts(self) -> Result<(i64, PatientInput), ClinicError> {
        let id = present(self.id, "id")?;
        let input = PatientInput {
            name: present(self.name, "name")?,
            birth_date: present(self.birth_date, "birthDate")?,
            identity_number: present(self.identity_number, "identityNumber")?,
            phone: present(self.phone, "phone")?,
        };
        Ok((id, input))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeletePatientRequest {
    #[validate(required)]
    pub id: Option<i64>,
}

impl DeletePatientRequest {
    pub fn id(&self) -> Result<i64, ClinicError> {
        present(self.id, "id")
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[validate(required)]
    pub patient_id: Option<i64>,
    #[validate(required)]
    pub doctor_id: Option<i64>,
    #[validate(required)]
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub scheduled_at: Option<NaiveDateTime>,
    #[validate(required)]
    pub value: Option<f64>,
}

impl TryFrom<CreateAppointmentRequest> for AppointmentInput {
    type Error = ClinicError;

    fn try_from(req: CreateAppointmentRequest) -> Result<Self, Self::Error> {
        Ok(AppointmentInput {
            patient_id: present(req.patient_id, "patientId")?,
            doctor_id: present(req.doctor_id, "doctorId")?,
            scheduled_at: present(req.scheduled_at, "scheduledAt")?,
            value: present(req.value, "value")?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicalRecordRequest {
    #[validate(required)]
    pub patient_id: Option<i64>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
}

impl TryFrom<CreateMedicalRecordRequest> for MedicalRecordInput {
    type Error = ClinicError;

    fn try_from(req: CreateMedicalRecordRequest) -> Result<Self, Self::Error> {
        Ok(MedicalRecordInput {
            patient_id: present(req.patient_id, "patientId")?,
            description: present(req.description, "description")?,
        })
    }
}

/// Resposta das operações de escrita sobre pacientes
#[derive(Debug, Serialize)]
pub struct PatientEnvelope {
    pub message: String,
    pub patient: Patient,
}

#[derive(Debug, Serialize)]
pub struct MedicalRecordEnvelope {
    pub message: String,
    pub record: MedicalRecord,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
}
