//! Ciclo de vida do paciente: cadastro, atualização e exclusão em cascata

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use common_db::cpf::Cpf;
use common_db::models::{NewPatient, Patient};
use common_db::{ClinicStore, DbError};
use tracing::{info, warn};

use super::required_text;
use crate::error::ClinicError;

/// Dados de paciente recebidos do cliente, CPF ainda sem normalização
#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub name: String,
    pub birth_date: NaiveDate,
    pub identity_number: String,
    pub phone: String,
}

pub struct PatientService {
    store: Arc<dyn ClinicStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Patient>, ClinicError> {
        Ok(self.store.list_patients().await?)
    }

    /// Cadastra um paciente.
    ///
    /// A unicidade do CPF fica a cargo da restrição do banco; a violação
    /// vira [`ClinicError::DuplicateIdentity`].
    pub async fn create(&self, input: PatientInput) -> Result<Patient, ClinicError> {
        let (patient, cpf) = prepare(input, today())?;

        match self.store.insert_patient(&patient).await {
            Ok(created) => {
                info!(patient_id = created.id, cpf = %cpf.redacted(), "Paciente cadastrado");
                Ok(created)
            }
            Err(DbError::UniqueViolation(_)) => {
                warn!(cpf = %cpf.redacted(), "Cadastro recusado: CPF já existe");
                Err(ClinicError::DuplicateIdentity)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atualiza todos os campos de um paciente.
    ///
    /// O CPF é verificado contra os demais pacientes antes do UPDATE; manter
    /// o próprio CPF é permitido.
    pub async fn update(&self, id: i64, input: PatientInput) -> Result<Patient, ClinicError> {
        let (patient, cpf) = prepare(input, today())?;

        if let Some(owner) = self
            .store
            .find_patient_id_by_cpf(cpf.as_str(), Some(id))
            .await?
        {
            warn!(patient_id = id, owner, cpf = %cpf.redacted(), "Atualização recusada: CPF de outro paciente");
            return Err(ClinicError::DuplicateIdentity);
        }

        match self.store.update_patient(id, &patient).await {
            Ok(Some(updated)) => {
                info!(patient_id = id, "Paciente atualizado");
                Ok(updated)
            }
            Ok(None) => Err(ClinicError::NotFound("Paciente")),
            // Outro cadastro com o mesmo CPF entrou entre a verificação e o UPDATE
            Err(DbError::UniqueViolation(_)) => Err(ClinicError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove o paciente junto com suas consultas e prontuários.
    ///
    /// A inexistência é detectada pelo próprio DELETE, sem consulta prévia.
    pub async fn delete(&self, id: i64) -> Result<Patient, ClinicError> {
        match self.store.delete_patient_cascade(id).await? {
            Some(deleted) => {
                info!(patient_id = id, "Paciente excluído");
                Ok(deleted)
            }
            None => Err(ClinicError::NotFound("Paciente")),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Valida os campos e normaliza o CPF
fn prepare(input: PatientInput, today: NaiveDate) -> Result<(NewPatient, Cpf), ClinicError> {
    let name = required_text("name", &input.name)?;
    let phone = required_text("phone", &input.phone)?;
    let raw_cpf = required_text("identityNumber", &input.identity_number)?;
    let cpf = Cpf::parse(&raw_cpf)?;

    if input.birth_date > today {
        return Err(ClinicError::Validation(
            "Data de nascimento inválida.".to_string(),
        ));
    }

    let patient = NewPatient {
        name,
        birth_date: input.birth_date,
        cpf: cpf.as_str().to_string(),
        phone,
    };
    Ok((patient, cpf))
}
