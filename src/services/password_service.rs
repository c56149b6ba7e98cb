//! Servicio de contraseñas
//!
//! Hash bcrypt con sal aleatoria por llamada y verificación en tiempo
//! constante. Nunca registra ni devuelve la contraseña en claro.
//!
//! bcrypt es CPU intensivo: los métodos del servicio lo ejecutan en el
//! pool de bloqueo de tokio para no ocupar los workers del runtime.

use bcrypt::{hash, verify};
use tokio::task;

use crate::utils::errors::AppError;

/// Servicio de hashing de contraseñas
#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
    /// Hash de referencia para igualar tiempos cuando el email no existe
    dummy_hash: String,
}

impl PasswordService {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash_password("timing-equaliser", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let plaintext = plaintext.to_string();
        let cost = self.cost;
        run_blocking(move || hash_password(&plaintext, cost)).await
    }

    pub async fn verify(&self, plaintext: &str, password_hash: &str) -> Result<bool, AppError> {
        let plaintext = plaintext.to_string();
        let password_hash = password_hash.to_string();
        run_blocking(move || verify_password(&plaintext, &password_hash)).await
    }

    /// Consume el mismo tiempo que una verificación real y siempre falla
    pub async fn verify_against_dummy(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.dummy_hash).await;
        false
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Password task failed: {}", e)))?
}

/// Hash bcrypt de una contraseña
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, AppError> {
    hash(plaintext, cost).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

/// Verificar contraseña; sólo falla si el hash está mal formado
pub fn verify_password(plaintext: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(plaintext, password_hash)
        .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))
}
