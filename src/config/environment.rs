//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Se carga una única vez
//! al arrancar el proceso y se comparte de forma inmutable vía `AppState`.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::config::database::DatabaseConfig;

/// Clave usada sólo fuera de producción cuando falta `JWT_SECRET`
const DEVELOPMENT_JWT_SECRET: &str = "development-only-jwt-secret-do-not-deploy";

/// Longitud mínima del secreto JWT en producción
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Errores de configuración: el proceso no arranca
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("JWT_SECRET must be at least 32 bytes in production")]
    WeakJwtSecret,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub run_migrations: bool,
    pub log_level: String,
    pub database: DatabaseConfig,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_production = environment == "production";

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) if is_production && secret.len() < MIN_PRODUCTION_SECRET_LEN => {
                return Err(ConfigError::WeakJwtSecret);
            }
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => DEVELOPMENT_JWT_SECRET.to_string(),
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 20)?,
            min_connections: parse_or("DATABASE_MIN_CONNECTIONS", get("DATABASE_MIN_CONNECTIONS"), 1)?,
            ..DatabaseConfig::default()
        };

        let bcrypt_cost = parse_or("BCRYPT_COST", get("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            port: parse_or("PORT", get("PORT"), 3000)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            jwt_secret,
            bcrypt_cost,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            run_migrations: parse_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), true)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            database,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// ¿Se está usando la clave JWT de desarrollo?
    pub fn uses_development_jwt_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}
