//! Esquema versionado da clínica

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Migrações na ordem de aplicação; a posição define a versão
pub(crate) const MIGRATIONS: &[&str] = &[
    // 001_initial_schema.sql
    r#"
    -- Tabela de pacientes (CPF somente com dígitos)
    CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        birth_date DATE NOT NULL,
        cpf TEXT NOT NULL UNIQUE CHECK (length(cpf) = 11 AND cpf NOT GLOB '*[^0-9]*'),
        phone TEXT NOT NULL
    );

    -- Tabela de médicos
    CREATE TABLE IF NOT EXISTS doctors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        specialty TEXT NOT NULL
    );

    -- Tabela de consultas
    CREATE TABLE IF NOT EXISTS appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        doctor_id INTEGER NOT NULL,
        scheduled_at TIMESTAMP NOT NULL,
        value REAL NOT NULL CHECK (value >= 0),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (patient_id) REFERENCES patients (id),
        FOREIGN KEY (doctor_id) REFERENCES doctors (id)
    );

    -- Tabela de prontuários
    CREATE TABLE IF NOT EXISTS medical_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        description TEXT NOT NULL,
        attended_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (patient_id) REFERENCES patients (id)
    );

    -- Listagens ordenadas e buscas por paciente
    CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments (patient_id);
    CREATE INDEX IF NOT EXISTS idx_appointments_doctor_id ON appointments (doctor_id);
    CREATE INDEX IF NOT EXISTS idx_appointments_scheduled_at ON appointments (scheduled_at);
    CREATE INDEX IF NOT EXISTS idx_medical_records_patient_id ON medical_records (patient_id);
    CREATE INDEX IF NOT EXISTS idx_medical_records_attended_at ON medical_records (attended_at);
    "#,

    // 002_seed_doctors.sql
    r#"
    INSERT INTO doctors (name, specialty) VALUES
        ('Dra. Ana Ribeiro', 'Clínica Geral'),
        ('Dr. Carlos Mendes', 'Cardiologia'),
        ('Dra. Beatriz Lima', 'Pediatria'),
        ('Dr. Eduardo Rocha', 'Ortopedia');
    "#,
];

/// Aplica, em ordem, as migrações acima da versão gravada em
/// `PRAGMA user_version`. Cada uma roda em transação própria junto com a
/// atualização da versão.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .context("Falha ao ler a versão do esquema")?;

    let pending: Vec<(i64, &str)> = MIGRATIONS
        .iter()
        .enumerate()
        .map(|(i, sql)| ((i + 1) as i64, *sql))
        .filter(|(version, _)| *version > current)
        .collect();

    if pending.is_empty() {
        debug!(version = current, "Esquema já atualizado");
        return Ok(());
    }

    for (version, sql) in pending {
        let mut transaction = pool
            .begin()
            .await
            .with_context(|| format!("Falha ao abrir transação da migração {}", version))?;

        sqlx::query(sql)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Migração {} falhou", version))?;

        sqlx::query(&format!("PRAGMA user_version = {}", version))
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao gravar a versão {}", version))?;

        transaction
            .commit()
            .await
            .with_context(|| format!("Falha ao confirmar a migração {}", version))?;

        info!(version, "Migração aplicada");
    }

    Ok(())
}
