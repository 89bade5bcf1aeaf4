//! Configuração do serviço a partir de variáveis de ambiente

use std::net::SocketAddr;

use common_db::DbConfig;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Valor inválido para {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Formato das linhas de log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `CLINIC_BRIDGE_ADDR`
    pub bind_addr: SocketAddr,
    /// `DATABASE_PATH` e `DB_MAX_CONNECTIONS`
    pub db: DbConfig,
    /// `MAX_CONCURRENT_REQUESTS`
    pub max_concurrent_requests: usize,
    /// `LOG_FORMAT` (`pretty` ou `json`)
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbConfig::default();

        let bind_addr: SocketAddr = parse_or(&lookup, "CLINIC_BRIDGE_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections: u32 = parse_or(
            &lookup,
            "DB_MAX_CONNECTIONS",
            &defaults.max_connections.to_string(),
        )?;
        let max_concurrent_requests: usize = parse_or(
            &lookup,
            "MAX_CONCURRENT_REQUESTS",
            &DEFAULT_MAX_CONCURRENT_REQUESTS.to_string(),
        )?;

        if max_connections == 0 {
            return Err(invalid("DB_MAX_CONNECTIONS", "0"));
        }
        if max_concurrent_requests == 0 {
            return Err(invalid("MAX_CONCURRENT_REQUESTS", "0"));
        }

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("LOG_FORMAT", other)),
        };

        Ok(Self {
            bind_addr,
            db: DbConfig {
                db_path: lookup("DATABASE_PATH").unwrap_or(defaults.db_path),
                max_connections,
            },
            max_concurrent_requests,
            log_format,
        })
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

/// Lê `key` ou, se ausente ou vazia, usa o texto padrão; ambos passam pelo
/// mesmo `parse`
fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|_| invalid(key, &raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.db.db_path, "data/clinic.db");
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.max_concurrent_requests, DEFAULT_MAX_CONCURRENT_REQUESTS);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("CLINIC_BRIDGE_ADDR", "  "), ("DB_MAX_CONNECTIONS", "")]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.db.max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CLINIC_BRIDGE_ADDR", "127.0.0.1:8080"),
            ("DATABASE_PATH", "/tmp/clinic.db"),
            ("DB_MAX_CONNECTIONS", "10"),
            ("MAX_CONCURRENT_REQUESTS", "16"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db.db_path, "/tmp/clinic.db");
        assert_eq!(config.db.max_connections, 10);
        assert_eq!(config.max_concurrent_requests, 16);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[("DB_MAX_CONNECTIONS", "muitas")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: "DB_MAX_CONNECTIONS",
                value: "muitas".to_string()
            }
        );
        assert!(config_from(&[("CLINIC_BRIDGE_ADDR", "localhost")]).is_err());
        assert!(config_from(&[("MAX_CONCURRENT_REQUESTS", "0")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
