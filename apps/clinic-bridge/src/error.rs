//! Erros dos serviços e sua tradução para respostas HTTP
//!
//! Toda resposta de erro tem o formato `{"error": "<mensagem>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common_db::cpf::CpfError;
use common_db::DbError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Mensagem devolvida ao cliente quando o banco falha
const STORAGE_FAILURE_MESSAGE: &str = "Erro interno ao acessar os dados da clínica.";

/// Erros que os serviços da clínica reportam ao chamador
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Campo obrigatório ausente ou malformado
    #[error("{0}")]
    Validation(String),

    /// Outro paciente já usa o CPF
    #[error("CPF já cadastrado para outro paciente.")]
    DuplicateIdentity,

    #[error("{0} não encontrado.")]
    NotFound(&'static str),

    /// Referência a paciente ou médico inexistente
    #[error("{0}")]
    ForeignKeyViolation(String),

    #[error("Falha no armazenamento: {0}")]
    Storage(#[source] DbError),
}

impl ClinicError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClinicError::Validation(_)
            | ClinicError::DuplicateIdentity
            | ClinicError::ForeignKeyViolation(_) => StatusCode::BAD_REQUEST,
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ClinicError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::ForeignKeyViolation(_) => {
                ClinicError::ForeignKeyViolation("Registro referenciado não existe.".to_string())
            }
            other => ClinicError::Storage(other),
        }
    }
}

impl From<CpfError> for ClinicError {
    fn from(error: CpfError) -> Self {
        ClinicError::Validation(format!("CPF inválido: {}", error))
    }
}

impl From<ValidationErrors> for ClinicError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| camel_case(field))
            .collect();
        fields.sort_unstable();
        ClinicError::Validation(format!(
            "Campos obrigatórios ausentes ou inválidos: {}",
            fields.join(", ")
        ))
    }
}

/// `birth_date` -> `birthDate`, como os campos aparecem no JSON
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ClinicError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ClinicError::Storage(source) => {
                error!(error = %source, "Falha no armazenamento");
                STORAGE_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
