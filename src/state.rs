//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo lo que contiene es inmutable tras el
//! arranque o internamente sincronizado (el pool).

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::{JwtService, PasswordService};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: JwtService,
    pub passwords: PasswordService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Result<Self, AppError> {
        let jwt = JwtService::new(&config.jwt_secret);
        let passwords = PasswordService::new(config.bcrypt_cost)?;

        Ok(Self {
            pool,
            jwt,
            passwords,
        })
    }
}
