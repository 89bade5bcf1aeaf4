//! Common DB - Biblioteca compartilhada para acesso ao banco de dados da clínica
//!
//! Reúne os modelos de pacientes, médicos, consultas e prontuários, o
//! esquema versionado, a validação de CPF e a implementação SQLite de
//! `ClinicStore`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

pub mod cpf;
pub mod error;
pub mod migrations;
pub mod models;
pub mod store;

pub use error::DbError;
pub use store::{ClinicStore, SqliteStore};

#[cfg(feature = "test-utils")]
pub use store::MockClinicStore;

/// Onde fica o arquivo SQLite e quantas conexões o pool mantém
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Caminho para o arquivo SQLite
    pub db_path: String,
    /// Limite de conexões simultâneas
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_path: "data/clinic.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Inicializa o pool de conexões SQLite e aplica as migrações pendentes
pub async fn init_db_pool(config: &DbConfig) -> Result<SqlitePool> {
    let db_path = Path::new(&config.db_path);

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Falha ao criar o diretório {}", parent.display()))?;
        }
    }

    // Chaves estrangeiras precisam estar ativas em toda conexão do pool
    let connection_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true)
        .pragma("synchronous", "NORMAL");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connection_options)
        .await
        .with_context(|| format!("Falha ao abrir o banco {}", config.db_path))?;

    migrations::run_migrations(&pool)
        .await
        .context("Falha ao atualizar o esquema da clínica")?;

    info!(db_path = %config.db_path, "Banco da clínica pronto");
    Ok(pool)
}
