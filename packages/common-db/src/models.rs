//! Modelos de dados compartilhados entre aplicações
//!
//! Este módulo define as estruturas de dados principais usadas pelo ecossistema da clínica

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Paciente cadastrado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Identificador atribuído pelo banco
    pub id: i64,
    /// Nome completo
    pub name: String,
    /// Data de nascimento
    pub birth_date: NaiveDate,
    /// CPF somente com dígitos
    #[serde(rename = "identityNumber")]
    pub cpf: String,
    /// Telefone de contato
    pub phone: String,
}

/// Dados de um paciente ainda não persistido (ou a persistir numa atualização)
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Deve chegar aqui já normalizado
    pub cpf: String,
    pub phone: String,
}

/// Médico (somente leitura)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
}

/// Representa uma consulta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Identificador único da consulta
    pub id: i64,
    /// Identificador do paciente
    pub patient_id: i64,
    /// Identificador do médico
    pub doctor_id: i64,
    /// Data e hora agendada para a consulta
    pub scheduled_at: NaiveDateTime,
    /// Valor cobrado
    pub value: f64,
    /// Data e hora de criação do registro
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub value: f64,
}

/// Versão de consulta usada nas listagens, com nomes já resolvidos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub id: i64,
    pub scheduled_at: NaiveDateTime,
    pub value: f64,
    pub patient_id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    pub specialty: String,
}

/// Prontuário (registro de atendimento)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub description: String,
    /// Momento do atendimento, preenchido pelo banco na criação
    pub attended_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicalRecord {
    pub patient_id: i64,
    pub description: String,
}

/// Prontuário com o nome do paciente, para listagens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordSummary {
    pub id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub attended_at: NaiveDateTime,
    pub description: String,
}

/// Quantidade de atendimentos de um CPF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCount {
    pub identity_number: String,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_serializes_with_api_field_names() {
        let patient = Patient {
            id: 7,
            name: "Maria Souza".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            cpf: "11144477735".to_string(),
            phone: "(11) 98765-4321".to_string(),
        };

        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Maria Souza",
                "birthDate": "1985-03-14",
                "identityNumber": "11144477735",
                "phone": "(11) 98765-4321",
            })
        );
    }

    #[test]
    fn test_attendance_count_field_names() {
        let count = AttendanceCount {
            identity_number: "11144477735".to_string(),
            total: 3,
        };
        let value = serde_json::to_value(&count).unwrap();
        assert_eq!(value["identityNumber"], "11144477735");
        assert_eq!(value["total"], 3);
    }
}
