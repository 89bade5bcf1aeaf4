//! Erros de acesso ao banco da clínica
//!
//! As violações de restrição ficam em variantes próprias porque os serviços
//! as traduzem em respostas diferentes (CPF duplicado, referência inexistente).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Banco indisponível: {0}")]
    ConnectionError(String),

    #[error("Consulta falhou: {0}")]
    QueryError(String),

    #[error("Registro não encontrado: {0}")]
    NotFound(String),

    /// Ex.: CPF já cadastrado
    #[error("Valor duplicado: {0}")]
    UniqueViolation(String),

    /// Paciente ou médico referenciado não existe
    #[error("Referência inexistente: {0}")]
    ForeignKeyViolation(String),

    #[error("Restrição violada: {0}")]
    ConstraintViolation(String),

    #[error("Falha interna do banco: {0}")]
    InternalError(String),
}

impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DbError::NotFound("nenhuma linha retornada".to_string()),
            sqlx::Error::Database(dbe) => {
                let message = dbe.message().to_string();
                if dbe.is_unique_violation() {
                    DbError::UniqueViolation(message)
                } else if dbe.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation(message)
                } else if dbe.is_check_violation() {
                    DbError::ConstraintViolation(message)
                } else {
                    DbError::QueryError(message)
                }
            }
            sqlx::Error::ColumnNotFound(column) => {
                DbError::QueryError(format!("coluna ausente: {}", column))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::QueryError(format!("coluna {} ilegível: {}", index, source))
            }
            sqlx::Error::Io(e) => DbError::ConnectionError(e.to_string()),
            sqlx::Error::Configuration(e) => DbError::ConnectionError(e.to_string()),
            sqlx::Error::PoolClosed => DbError::ConnectionError("pool fechado".to_string()),
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionError("tempo esgotado aguardando conexão".to_string())
            }
            other => DbError::InternalError(other.to_string()),
        }
    }
}
