//! Binário do micro-serviço clinic-bridge
//!
//! Lê a configuração do ambiente (e de um `.env`, se houver), inicializa o
//! banco SQLite com as migrações e serve a API REST.

use std::sync::Arc;

use anyhow::{Context, Result};
use clinic_bridge::config::LogFormat;
use clinic_bridge::{router, AppConfig, AppState};
use common_db::{init_db_pool, SqliteStore};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "clinic_bridge=info,common_db=info,tower_http=info";

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    result.context("Falha ao inicializar o tracing")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Falha ao escutar o sinal de encerramento: {}", e);
    }
    info!("Encerrando o servidor...");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Configuração inválida")?;
    init_tracing(config.log_format)?;

    info!(
        version = clinic_bridge::built_info::PKG_VERSION,
        addr = %config.bind_addr,
        db_path = %config.db.db_path,
        "Iniciando clinic-bridge"
    );

    let pool = init_db_pool(&config.db).await?;
    let state = AppState::new(Arc::new(SqliteStore::new(pool.clone())));
    let app = router(state, config.max_concurrent_requests);

    axum::Server::try_bind(&config.bind_addr)
        .with_context(|| format!("Falha ao abrir {}", config.bind_addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Servidor HTTP falhou")?;

    pool.close().await;
    info!("Servidor encerrado");
    Ok(())
}
