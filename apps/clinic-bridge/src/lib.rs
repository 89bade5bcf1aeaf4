//! Clinic Bridge - API REST de pacientes, médicos, consultas e prontuários
//!
//! O acesso ao banco vem de `common-db`; aqui ficam as regras de negócio
//! (`service`), a tradução de erros para HTTP (`error`) e as rotas (`api`).

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod state;

/// Informações geradas em tempo de build
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use api::router;
pub use config::AppConfig;
pub use error::ClinicError;
pub use state::AppState;
